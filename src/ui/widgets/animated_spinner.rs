// SPDX-License-Identifier: MPL-2.0
//! Canvas spinner shown inside buttons while work is in flight.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};
use std::time::Duration;

/// One full turn per second.
const TURN_DURATION_SECS: f32 = 1.0;

/// Spinner angle for the time elapsed since the work started.
#[must_use]
pub fn rotation_at(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / TURN_DURATION_SECS).fract() * TAU
}

/// Spinning arc over a faint track.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::SPINNER_SM,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self.cache.clear();
        self
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }

    fn stroke_width(&self) -> f32 {
        (self.size / 8.0).clamp(2.0, 4.0)
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let width = self.stroke_width();
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - width;

                frame.stroke(
                    &Path::circle(center, radius),
                    Stroke::default().with_width(width).with_color(Color {
                        a: 0.25,
                        ..self.color
                    }),
                );

                // Quarter-turn arc starting at 12 o'clock.
                let start = self.rotation - PI / 2.0;
                let sweep = PI / 2.0;
                let segments = 16_u8;

                let mut arc = canvas::path::Builder::new();
                arc.move_to(Point::new(
                    center.x + radius * start.cos(),
                    center.y + radius * start.sin(),
                ));
                for i in 1..=segments {
                    let angle = start + sweep * f32::from(i) / f32::from(segments);
                    arc.line_to(Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }

                frame.stroke(
                    &arc.build(),
                    Stroke::default()
                        .with_width(width)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rotation_wraps_every_turn() {
        assert_abs_diff_eq!(rotation_at(Duration::ZERO), 0.0);
        assert_abs_diff_eq!(rotation_at(Duration::from_millis(250)), TAU / 4.0, epsilon = 1e-4);
        assert_abs_diff_eq!(
            rotation_at(Duration::from_millis(1250)),
            rotation_at(Duration::from_millis(250)),
            epsilon = 1e-4
        );
    }

    #[test]
    fn stroke_scales_with_size() {
        let small = AnimatedSpinner::new(Color::WHITE, 0.0);
        assert_abs_diff_eq!(small.stroke_width(), 2.25);

        let large = AnimatedSpinner::new(Color::WHITE, 0.0).with_size(sizing::ICON_XL);
        assert_abs_diff_eq!(large.stroke_width(), 4.0);
    }
}
