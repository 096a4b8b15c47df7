// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Card surface holding the header and the main panel.
///
/// The color is derived from the active Iced `Theme` background, with a slight
/// opacity, so cards stay readable in both light and dark modes without
/// hard-coding colors.
pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.weak.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Upload drop zone; highlighted while a file hovers over the window.
pub fn drop_zone(is_drag_over: bool, disabled: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let base = theme.extended_palette().background.base.color;
        let (border_color, background) = if is_drag_over {
            (
                palette::PRIMARY_500,
                Color {
                    a: opacity::OVERLAY_SUBTLE,
                    ..palette::PRIMARY_200
                },
            )
        } else {
            (palette::GRAY_400, base)
        };
        let alpha = if disabled { opacity::OVERLAY_MEDIUM } else { opacity::OPAQUE };

        container::Style {
            background: Some(Background::Color(Color {
                a: background.a * alpha,
                ..background
            })),
            border: Border {
                color: Color {
                    a: alpha,
                    ..border_color
                },
                width: border::WIDTH_MD,
                radius: radius::LG.into(),
            },
            text_color: Some(Color {
                a: alpha,
                ..theme.palette().text
            }),
            ..Default::default()
        }
    }
}

/// Destructive panel showing the analysis error.
pub fn error_panel(theme: &Theme) -> container::Style {
    accent_panel(theme, palette::ERROR_500)
}

/// Panel showing a completed analysis.
pub fn success_panel(theme: &Theme) -> container::Style {
    accent_panel(theme, palette::SUCCESS_500)
}

fn accent_panel(theme: &Theme, accent: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..accent
        })),
        border: Border {
            color: accent,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}
