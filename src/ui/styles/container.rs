// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, radius, shadow};
use crate::ui::theming::scheme_for;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Card surface holding the acquisition area or the result.
///
/// Derived from the active Iced `Theme` background so cards stay readable
/// in both light and dark modes.
pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.base.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Dashed-looking drop target. Highlighted while a file hovers the window.
pub fn drop_zone(hovering: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let scheme = scheme_for(theme);
        let (background, border_color) = if hovering {
            (scheme.drop_highlight, scheme.brand_primary)
        } else {
            (scheme.surface_secondary, scheme.text_tertiary)
        };

        container::Style {
            background: Some(Background::Color(background)),
            border: Border {
                color: border_color,
                width: border::WIDTH_MD,
                radius: radius::LG.into(),
            },
            ..Default::default()
        }
    }
}

/// Frame around the selected image preview.
pub fn preview_frame(theme: &Theme) -> container::Style {
    let scheme = scheme_for(theme);
    container::Style {
        background: Some(Background::Color(scheme.surface_tertiary)),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Round confidence badge filled with the tier color.
pub fn badge(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        text_color: Some(Color::WHITE),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Result section (description, treatment) with a tinted left accent.
pub fn section(accent: Color) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let scheme = scheme_for(theme);
        container::Style {
            background: Some(Background::Color(scheme.surface_secondary)),
            border: Border {
                color: Color {
                    a: opacity::OVERLAY_MEDIUM,
                    ..accent
                },
                width: border::WIDTH_SM,
                radius: radius::MD.into(),
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_zone_highlight_differs_from_idle() {
        let idle = drop_zone(false)(&Theme::Light);
        let hover = drop_zone(true)(&Theme::Light);
        assert_ne!(idle.background, hover.background);
        assert_ne!(idle.border.color, hover.border.color);
    }

    #[test]
    fn badge_uses_given_color() {
        let color = Color::from_rgb(0.1, 0.6, 0.2);
        let style = badge(color)(&Theme::Dark);
        assert_eq!(style.background, Some(Background::Color(color)));
    }
}
