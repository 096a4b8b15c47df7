// SPDX-License-Identifier: MPL-2.0
//! Result panel shown below the analyze button.
//!
//! Rendering is split in two steps: [`panel`] decides *what* to show from the
//! current state, and [`view`] turns that decision into widgets. The first
//! step is a pure function, which keeps the precedence rules testable without
//! a renderer:
//!
//! 1. an error, if any, wins over everything else;
//! 2. without a result nothing is shown;
//! 3. otherwise the success panel shows the preview, the emotion and the
//!    confidence as a percentage.

use crate::classifier::EmotionResult;
use crate::config::PREVIEW_MAX_HEIGHT;
use crate::i18n::fluent::I18n;
use crate::media::Preview;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{text, Column, Container, Image, Space, Text};
use iced::{alignment, ContentFit, Element, Length, Theme};

/// What the result area displays.
#[derive(Debug, Clone)]
pub enum Panel<'a> {
    Nothing,
    Error {
        message: &'a str,
    },
    Success {
        emotion: &'a str,
        /// Confidence already formatted, e.g. `87.3%`.
        confidence: String,
        preview: Option<&'a Preview>,
    },
}

impl PartialEq for Panel<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Panel::Nothing, Panel::Nothing) => true,
            (Panel::Error { message: a }, Panel::Error { message: b }) => a == b,
            (
                Panel::Success {
                    emotion: e1,
                    confidence: c1,
                    preview: p1,
                },
                Panel::Success {
                    emotion: e2,
                    confidence: c2,
                    preview: p2,
                },
            ) => {
                let same_preview = match (p1, p2) {
                    (Some(a), Some(b)) => std::ptr::eq(*a, *b),
                    (None, None) => true,
                    _ => false,
                };
                e1 == e2 && c1 == c2 && same_preview
            }
            _ => false,
        }
    }
}

/// Chooses the panel for the given state.
#[must_use]
pub fn panel<'a>(
    result: Option<&'a EmotionResult>,
    preview: Option<&'a Preview>,
    error: Option<&'a str>,
) -> Panel<'a> {
    if let Some(message) = error.filter(|message| !message.is_empty()) {
        return Panel::Error { message };
    }

    match result {
        None => Panel::Nothing,
        Some(result) => Panel::Success {
            emotion: &result.emotion,
            confidence: result.confidence_percent(),
            preview,
        },
    }
}

/// Uppercases the first character for display (`happy` → `Happy`).
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders the chosen panel.
pub fn view<'a, Message: 'a>(panel: Panel<'a>, i18n: &I18n) -> Element<'a, Message> {
    match panel {
        Panel::Nothing => Space::new().into(),
        Panel::Error { message } => {
            let title = Text::new(i18n.tr("result-error-title"))
                .size(typography::TITLE_SM)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::ERROR_500),
                });
            let content = Column::new()
                .spacing(spacing::XS)
                .push(title)
                .push(Text::new(message).size(typography::BODY));

            Container::new(content)
                .width(Length::Fill)
                .padding(spacing::MD)
                .style(styles::container::error_panel)
                .into()
        }
        Panel::Success {
            emotion,
            confidence,
            preview,
        } => {
            let mut content = Column::new()
                .spacing(spacing::SM)
                .align_x(alignment::Horizontal::Center)
                .width(Length::Fill);

            if let Some(preview) = preview {
                content = content.push(
                    Image::new(preview.handle.clone())
                        .height(Length::Fixed(PREVIEW_MAX_HEIGHT))
                        .content_fit(ContentFit::Contain),
                );
            }

            let display_emotion = capitalize(emotion);
            content = content
                .push(Text::new(i18n.tr("result-success-title")).size(typography::TITLE_SM))
                .push(
                    Text::new(i18n.tr_with_args(
                        "result-emotion-label",
                        &[("emotion", display_emotion.as_str())],
                    ))
                    .size(typography::TITLE_MD),
                )
                .push(
                    Text::new(i18n.tr_with_args(
                        "result-confidence-label",
                        &[("confidence", confidence.as_str())],
                    ))
                    .size(typography::BODY),
                );

            Container::new(content)
                .width(Length::Fill)
                .padding(spacing::MD)
                .style(styles::container::success_panel)
                .into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn preview() -> Preview {
        Preview {
            handle: iced::widget::image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255]),
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn error_wins_over_result_and_preview() {
        let result = EmotionResult::new("happy", 0.9);
        let preview = preview();
        let panel = panel(Some(&result), Some(&preview), Some("HTTP error! status: 500"));
        assert_eq!(
            panel,
            Panel::Error {
                message: "HTTP error! status: 500"
            }
        );
    }

    #[test]
    fn no_error_and_no_result_renders_nothing() {
        assert_eq!(panel(None, None, None), Panel::Nothing);
        let preview = preview();
        assert_eq!(panel(None, Some(&preview), None), Panel::Nothing);
    }

    #[test]
    fn empty_error_is_not_an_error() {
        assert_eq!(panel(None, None, Some("")), Panel::Nothing);
    }

    #[test]
    fn success_panel_carries_emotion_and_percentage() {
        let result = EmotionResult::new("happy", 0.873);
        match panel(Some(&result), None, None) {
            Panel::Success {
                emotion,
                confidence,
                preview,
            } => {
                assert!(emotion.contains("happy"));
                assert_eq!(confidence, "87.3%");
                assert!(preview.is_none());
            }
            other => panic!("expected success panel, got {other:?}"),
        }
    }

    #[test]
    fn success_labels_render_capitalized_emotion() {
        let i18n = I18n::new(Some("en-US".into()), &Config::default());
        let emotion = capitalize("happy");
        assert_eq!(
            i18n.tr_with_args("result-emotion-label", &[("emotion", emotion.as_str())]),
            "Emotion: Happy"
        );
        assert_eq!(
            i18n.tr_with_args("result-confidence-label", &[("confidence", "87.3%")]),
            "Confidence: 87.3%"
        );
    }

    #[test]
    fn rendering_decision_is_idempotent() {
        let result = EmotionResult::new("sad", 0.5);
        let preview = preview();
        let first = panel(Some(&result), Some(&preview), None);
        let second = panel(Some(&result), Some(&preview), None);
        assert_eq!(first, second);
    }

    #[test]
    fn capitalize_handles_edge_cases() {
        assert_eq!(capitalize("happy"), "Happy");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize("Unknown"), "Unknown");
    }
}
