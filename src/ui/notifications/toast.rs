// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering notifications.
//!
//! Toasts are small cards with a severity-colored border, an icon, the
//! localized message and a dismiss button. They stack in the bottom-right
//! corner.

use super::manager::{Manager, Message};
use super::notification::{Notification, Severity};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, radius, shadow, sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use iced::widget::{button, container, Column, Container, Row, Space, Svg, Text};
use iced::{alignment, Color, Element, Length, Theme};

pub struct Toast;

impl Toast {
    /// Resolves the notification text in the current locale.
    pub fn message_text(notification: &Notification, i18n: &I18n) -> String {
        if notification.message_args().is_empty() {
            i18n.tr(notification.message_key())
        } else {
            let args: Vec<(&str, &str)> = notification
                .message_args()
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            i18n.tr_with_args(notification.message_key(), &args)
        }
    }

    pub fn view<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
        let severity = notification.severity();
        let accent_color = severity.color();

        let icon = icons::tinted(Self::severity_icon(severity), sizing::ICON_MD, accent_color);

        let message_widget = Text::new(Self::message_text(notification, i18n)).size(typography::BODY);

        let dismiss_button = button(icons::themed(icons::cross(), sizing::ICON_SM))
            .on_press(Message::Dismiss(notification.id()))
            .padding(spacing::XXS)
            .style(styles::button::ghost);

        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(icon)
            .push(Container::new(message_widget).width(Length::Fill))
            .push(dismiss_button);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color))
            .into()
    }

    /// All visible toasts, bottom-right aligned. Meant to sit on top of the
    /// main content in a `Stack`.
    pub fn view_overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
        if manager.visible_count() == 0 {
            return Space::new().width(Length::Shrink).height(Length::Shrink).into();
        }

        let toasts = manager
            .visible()
            .map(|notification| Self::view(notification, i18n));

        Container::new(
            Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::MD)
        .into()
    }

    fn severity_icon(severity: Severity) -> Svg<'static> {
        match severity {
            Severity::Success => icons::check_circle(),
            Severity::Info => icons::info(),
            Severity::Warning | Severity::Error => icons::warning(),
        }
    }
}

fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::ui::design_tokens::palette;

    #[test]
    fn toast_container_style_uses_accent_color() {
        let style = toast_container_style(&Theme::Dark, palette::ERROR_500);
        assert_eq!(style.border.color, palette::ERROR_500);
        assert!(style.background.is_some());
    }

    #[test]
    fn message_text_resolves_arguments() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        let notification =
            Notification::warning("notification-image-load-error").with_arg("name", "leaf.png");

        let text = Toast::message_text(&notification, &i18n);
        assert!(text.contains("leaf.png"));
        assert!(!text.starts_with("MISSING"));
    }

    #[test]
    fn camera_alerts_have_translations() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        assert_eq!(
            i18n.tr("notification-camera-access-error"),
            "Could not access camera."
        );
        assert_eq!(i18n.tr("notification-camera-unsupported"), "Camera not supported.");
    }
}
