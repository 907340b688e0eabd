// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the page header and the active stage, with the toast overlay
//! stacked on top.

use super::{Message, Stage};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::{self, Toast};
use crate::ui::{acquisition, results};
use iced::{
    alignment,
    widget::{scrollable, Column, Container, Stack, Text},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub stage: &'a Stage,
    pub notifications: &'a notifications::Manager,
}

/// Renders the current application view based on the active stage.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;

    let stage_view: Element<'_, Message> = match ctx.stage {
        Stage::Acquisition(state) => {
            acquisition::view(state, acquisition::ViewContext { i18n }).map(Message::Acquisition)
        }
        Stage::Results(result) => {
            results::view(results::ViewContext { i18n, result }).map(Message::Results)
        }
    };

    let column = Column::new()
        .spacing(spacing::LG)
        .width(Length::Fill)
        .max_width(sizing::CONTENT_WIDTH)
        .push(header(i18n))
        .push(stage_view);

    let page = scrollable(
        Container::new(column)
            .width(Length::Fill)
            .padding(spacing::LG)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill);

    let toasts = Toast::view_overlay(ctx.notifications, i18n).map(Message::Notification);

    Stack::new()
        .push(page)
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn header(i18n: &I18n) -> Element<'_, Message> {
    Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .push(Text::new(i18n.tr("app-heading")).size(typography::TITLE_LG))
        .push(
            Text::new(i18n.tr("app-intro"))
                .size(typography::BODY_LG)
                .align_x(alignment::Horizontal::Center),
        )
        .into()
}
