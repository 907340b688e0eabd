// SPDX-License-Identifier: MPL-2.0
//! Centralized icon module.
//!
//! Icons are small stroke SVGs embedded in the binary. Handles are cached in
//! a `OnceLock` so each document is parsed once. Color is applied at render
//! time through the svg style, so the same icon serves light and dark themes.
//!
//! # Naming Convention
//!
//! Icons use generic visual names describing the icon's appearance,
//! not the action context (e.g., `cross` not `clear_selection`).

use iced::widget::svg::{self, Handle, Svg};
use iced::{Color, Length, Theme};
use std::sync::OnceLock;

/// Defines an icon function returning a cached SVG handle.
macro_rules! define_icon {
    ($name:ident, $body:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name() -> Svg<'static> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            let handle = HANDLE.get_or_init(|| Handle::from_memory(wrap($body).into_bytes()));
            Svg::new(handle.clone())
        }
    };
}

/// Wraps path data in a 24x24 stroke-only SVG document.
fn wrap(body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="black" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">{body}</svg>"#
    )
}

define_icon!(
    upload,
    r#"<path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"/><polyline points="17 8 12 3 7 8"/><line x1="12" y1="3" x2="12" y2="15"/>"#,
    "Upload icon: arrow rising out of a tray."
);
define_icon!(
    image,
    r#"<rect x="3" y="3" width="18" height="18" rx="2"/><circle cx="9" cy="9" r="2"/><path d="m21 15-3.1-3.1a2 2 0 0 0-2.8 0L6 21"/>"#,
    "Image icon: framed picture with a mountain."
);
define_icon!(
    camera,
    r#"<path d="M14.5 4h-5L7 7H4a2 2 0 0 0-2 2v9a2 2 0 0 0 2 2h16a2 2 0 0 0 2-2V9a2 2 0 0 0-2-2h-3l-2.5-3z"/><circle cx="12" cy="13" r="3"/>"#,
    "Camera icon: camera body with lens."
);
define_icon!(
    leaf,
    r#"<path d="M11 20A7 7 0 0 1 9.8 6.1C15.5 5 17 4.5 19 2c1 2 2 4.2 2 8 0 5.5-4.8 10-10 10Z"/><path d="M2 21c0-3 1.9-5.4 5.2-6.1C9.5 14.4 12 13 13 12"/>"#,
    "Leaf icon."
);
define_icon!(
    check_circle,
    r#"<circle cx="12" cy="12" r="10"/><path d="m9 12 2 2 4-4"/>"#,
    "Check mark inside a circle."
);
define_icon!(
    warning,
    r#"<path d="m21.7 18-8-14a2 2 0 0 0-3.4 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.7-3"/><path d="M12 9v4"/><path d="M12 17h.01"/>"#,
    "Warning icon: exclamation mark in a triangle."
);
define_icon!(
    info,
    r#"<circle cx="12" cy="12" r="10"/><path d="M12 16v-4"/><path d="M12 8h.01"/>"#,
    "Info icon: letter i in a circle."
);
define_icon!(
    cross,
    r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#,
    "Cross icon: two diagonal strokes."
);
define_icon!(
    refresh,
    r#"<path d="M3 12a9 9 0 0 1 15-6.7L21 8"/><path d="M21 3v5h-5"/><path d="M21 12a9 9 0 0 1-15 6.7L3 16"/><path d="M8 16H3v5"/>"#,
    "Refresh icon: two circular arrows."
);

/// Sizes an icon to a square of `size` pixels.
pub fn sized(icon: Svg<'static>, size: f32) -> Svg<'static> {
    icon.width(Length::Fixed(size)).height(Length::Fixed(size))
}

/// Sizes and tints an icon with a fixed color.
pub fn tinted(icon: Svg<'static>, size: f32, color: Color) -> Svg<'static> {
    sized(icon, size).style(move |_theme: &Theme, _status| svg::Style { color: Some(color) })
}

/// Sizes an icon and tints it with the theme's text color.
pub fn themed(icon: Svg<'static>, size: f32) -> Svg<'static> {
    sized(icon, size).style(|theme: &Theme, _status| svg::Style {
        color: Some(theme.palette().text),
    })
}
