// SPDX-License-Identifier: MPL-2.0
//! Window icon, rasterized at runtime from the embedded branding SVG.

use iced::window::{icon, Icon};
use resvg::usvg;

const SVG_SOURCE: &str = include_str!("../assets/branding/plant_doctor.svg");

/// Edge length of the rasterized icon.
pub const ICON_SIZE: u32 = 128;

/// Renders the branding SVG to a square RGBA buffer of `size` pixels.
/// Returns `None` if parsing or rendering fails.
#[must_use]
pub fn render_rgba(size: u32) -> Option<Vec<u8>> {
    let tree = usvg::Tree::from_data(SVG_SOURCE.as_bytes(), &usvg::Options::default()).ok()?;

    let source = tree.size();
    #[allow(clippy::cast_precision_loss)] // icon sizes are tiny
    let transform = tiny_skia::Transform::from_scale(
        size as f32 / source.width(),
        size as f32 / source.height(),
    );

    let mut pixmap = tiny_skia::Pixmap::new(size, size)?;
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Some(pixmap.take())
}

/// Icon for the window title bar, or `None` if rendering fails.
#[must_use]
pub fn load_window_icon() -> Option<Icon> {
    let rgba = render_rgba(ICON_SIZE)?;
    icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branding_svg_rasterizes() {
        let rgba = render_rgba(32).expect("embedded svg renders");
        assert_eq!(rgba.len(), 32 * 32 * 4);
        // Rounded corners stay transparent, the center is painted.
        assert_eq!(rgba[3], 0);
        let center = (16 * 32 + 16) * 4;
        assert_eq!(rgba[center + 3], 255);
    }

    #[test]
    fn window_icon_loads() {
        assert!(load_window_icon().is_some());
    }
}
