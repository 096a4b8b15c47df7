// SPDX-License-Identifier: MPL-2.0
//! Animated spinner widget using Canvas for smooth rotation.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, path, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Radians, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

const STROKE_WIDTH: f32 = 3.0;
const TRACK_ALPHA: f32 = 0.25;

/// Returns the rotation after one animation step, wrapped to `[0, 2π)`.
#[must_use]
pub fn advance(rotation: f32, step: f32) -> f32 {
    (rotation + step).rem_euclid(TAU)
}

/// Spinner drawn as a faint track with a half-circle arc rotating over it.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32, // radians
    color: Color,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
        }
    }

    /// Creates a Canvas widget from this spinner.
    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        Canvas::new(self)
            .width(Length::Fixed(sizing::SPINNER_SIZE))
            .height(Length::Fixed(sizing::SPINNER_SIZE))
            .into()
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
        let geometry = self.cache.draw(renderer, bounds.size(), |frame: &mut Frame| {
            let center = frame.center();
            let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH;

            frame.stroke(
                &Path::circle(center, radius),
                Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                    a: TRACK_ALPHA,
                    ..self.color
                }),
            );

            // Start at twelve o'clock.
            let start = self.rotation - PI / 2.0;
            let arc = Path::new(|builder| {
                builder.arc(path::Arc {
                    center,
                    radius,
                    start_angle: Radians(start),
                    end_angle: Radians(start + PI),
                });
            });
            frame.stroke(
                &arc,
                Stroke::default()
                    .with_width(STROKE_WIDTH)
                    .with_color(self.color)
                    .with_line_cap(canvas::LineCap::Round),
            );
        });

        vec![geometry]
    }
}
