// SPDX-License-Identifier: MPL-2.0
//! Result presentation screen.
//!
//! Renders a [`DiagnosisResult`] with a tier-colored confidence badge and
//! offers a single way out: the reset button, which emits [`Event::Reset`]
//! once per press.

use crate::diagnosis::{ConfidenceTier, DiagnosisResult, ResultIcon};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, Column, Container, Row, Svg, Text},
    Element, Length,
};

/// Contextual data needed to render the result screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub result: &'a DiagnosisResult,
}

/// Messages emitted by the result screen.
#[derive(Debug, Clone)]
pub enum Message {
    ResetRequested,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    Reset,
}

/// Process a result screen message and return the corresponding event.
#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::ResetRequested => Event::Reset,
    }
}

/// Icon for the header, tinted with the tier color.
#[must_use]
pub fn header_icon(result: &DiagnosisResult) -> Svg<'static> {
    let icon = match result.icon() {
        ResultIcon::Success => icons::check_circle(),
        ResultIcon::Warning => icons::warning(),
    };
    icons::tinted(icon, sizing::ICON_XL, result.tier().color())
}

/// Render the result screen.
#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let result = ctx.result;
    let tier = result.tier();

    let title = Text::new(i18n.tr("result-title")).size(typography::TITLE_MD);

    let content = Column::new()
        .width(Length::Fill)
        .spacing(spacing::LG)
        .push(title)
        .push(build_header(i18n, result, tier))
        .push(build_section(
            icons::info(),
            i18n.tr("result-description-title"),
            result.description(),
            palette::INFO_500,
        ))
        .push(build_section(
            icons::leaf(),
            i18n.tr("result-treatment-title"),
            result.treatment(),
            palette::PRIMARY_500,
        ))
        .push(build_reset_button(i18n));

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(styles::container::card)
        .into()
}

fn build_header<'a>(
    i18n: &'a I18n,
    result: &'a DiagnosisResult,
    tier: ConfidenceTier,
) -> Element<'a, Message> {
    let color = tier.color();

    let value = Text::new(i18n.tr_with_args(
        "result-confidence-value",
        &[("value", &result.confidence().label())],
    ))
    .size(typography::TITLE_MD)
    .color(palette::WHITE);

    let badge = Container::new(value)
        .center(Length::Fixed(sizing::BADGE_SIZE))
        .style(styles::container::badge(color));

    let name = Text::new(result.name()).size(typography::TITLE_LG);

    let confidence_line = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(Text::new(i18n.tr("result-confidence-label")).size(typography::BODY))
        .push(
            Text::new(i18n.tr(tier.label_key()))
                .size(typography::BODY)
                .color(color),
        );

    let heading = Column::new()
        .spacing(spacing::XXS)
        .push(name)
        .push(confidence_line);

    Row::new()
        .spacing(spacing::MD)
        .align_y(Vertical::Center)
        .push(header_icon(result))
        .push(Container::new(heading).width(Length::Fill))
        .push(badge)
        .into()
}

fn build_section<'a>(
    icon: Svg<'static>,
    title: String,
    body: &'a str,
    accent: iced::Color,
) -> Element<'a, Message> {
    let header = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(icons::tinted(icon, sizing::ICON_SM, accent))
        .push(Text::new(title).size(typography::TITLE_SM));

    let content = Column::new()
        .spacing(spacing::XS)
        .push(header)
        .push(Text::new(body).size(typography::BODY));

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::section(accent))
        .into()
}

fn build_reset_button(i18n: &I18n) -> Element<'_, Message> {
    let label = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(icons::tinted(icons::refresh(), sizing::ICON_SM, palette::WHITE))
        .push(Text::new(i18n.tr("result-reset-button")).size(typography::BODY));

    button(Container::new(label).align_x(Horizontal::Center).width(Length::Fill))
        .on_press(Message::ResetRequested)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::diagnosis::Confidence;

    #[test]
    fn reset_emits_one_event_per_press() {
        let events: Vec<Event> = (0..3).map(|_| update(&Message::ResetRequested)).collect();
        assert_eq!(events, vec![Event::Reset, Event::Reset, Event::Reset]);
    }

    #[test]
    fn tier_labels_are_translated() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        for tier in [
            ConfidenceTier::High,
            ConfidenceTier::Medium,
            ConfidenceTier::Low,
            ConfidenceTier::None,
        ] {
            assert!(!i18n.tr(tier.label_key()).starts_with("MISSING"));
        }
    }

    #[test]
    fn confidence_value_is_formatted_as_percentage() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        let text = i18n.tr_with_args("result-confidence-value", &[("value", "87")]);
        assert_eq!(text, "87%");
    }

    #[test]
    fn view_builds_for_partial_result() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        let result = DiagnosisResult::new("Leaf Rust", Confidence::new(80), "", "");
        let _element = view(ViewContext {
            i18n: &i18n,
            result: &result,
        });
        assert_eq!(result.treatment(), "No treatment information available");
    }
}
