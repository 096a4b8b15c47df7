// SPDX-License-Identifier: MPL-2.0
//! File intake: drop zone plus file picker.
//!
//! Window-level drag events are routed here by the application. Dropped files
//! are accepted only when their MIME type is an image type; anything else is
//! declined silently. Files chosen through the picker are accepted as-is, the
//! picker filter being advisory only.
//!
//! The window reports one drop per file, so a drag carrying several files
//! yields several drops. Only the first drop after a hover is considered;
//! the rest of the batch is ignored.
//!
//! While the box is disabled (an analysis is running) every input is ignored,
//! except that the drag-over highlight still resets.

use crate::i18n::fluent::I18n;
use crate::media::{is_image_mime, mime_from_path};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Text};
use iced::{alignment, Element, Length};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    /// A file is being dragged over the window.
    FileHovered,
    /// The dragged files left the window.
    FilesHoveredLeft,
    FileDropped(PathBuf),
    BrowsePressed,
    /// Result of the file picker; `None` when cancelled.
    Picked(Option<PathBuf>),
}

/// What the application must do after an intake message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    OpenPicker,
    FileSelected(PathBuf),
}

#[derive(Debug, Default)]
pub struct State {
    is_drag_over: bool,
    /// Set once the current drag batch has delivered its first file.
    drop_taken: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_drag_over(&self) -> bool {
        self.is_drag_over
    }

    pub fn update(&mut self, message: Message, disabled: bool) -> Event {
        match message {
            Message::FileHovered => {
                self.is_drag_over = !disabled;
                self.drop_taken = false;
                Event::None
            }
            Message::FilesHoveredLeft => {
                self.is_drag_over = false;
                self.drop_taken = false;
                Event::None
            }
            Message::FileDropped(path) => {
                self.is_drag_over = false;
                if std::mem::replace(&mut self.drop_taken, true) {
                    tracing::debug!(path = %path.display(), "ignoring extra file of a multi-file drop");
                    return Event::None;
                }
                if disabled {
                    return Event::None;
                }
                let mime = mime_from_path(&path);
                if is_image_mime(mime) {
                    Event::FileSelected(path)
                } else {
                    tracing::debug!(path = %path.display(), mime, "ignoring non-image drop");
                    Event::None
                }
            }
            Message::BrowsePressed if disabled => Event::None,
            Message::BrowsePressed => Event::OpenPicker,
            Message::Picked(Some(path)) if !disabled => Event::FileSelected(path),
            Message::Picked(_) => Event::None,
        }
    }

    /// Renders the drop zone; `file_name` is the current selection, if any.
    pub fn view<'a>(
        &self,
        i18n: &I18n,
        file_name: Option<&str>,
        disabled: bool,
    ) -> Element<'a, Message> {
        let title_key = if self.is_drag_over {
            "upload-title-drag-over"
        } else {
            "upload-title"
        };

        let mut content = Column::new()
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Center)
            .push(Text::new("⬆").size(sizing::ICON_LG))
            .push(Text::new(i18n.tr(title_key)).size(typography::TITLE_SM))
            .push(Text::new(i18n.tr("upload-hint")).size(typography::BODY))
            .push(Text::new(i18n.tr("upload-formats")).size(typography::CAPTION));

        if let Some(name) = file_name {
            content = content.push(
                Text::new(i18n.tr_with_args("upload-selected", &[("name", name)]))
                    .size(typography::BODY_SM),
            );
        }

        let zone = Container::new(content)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::DROP_ZONE_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .padding(spacing::MD)
            .style(styles::container::drop_zone(self.is_drag_over, disabled));

        button(zone)
            .padding(0)
            .width(Length::Fill)
            .on_press_maybe((!disabled).then_some(Message::BrowsePressed))
            .style(styles::button::drop_zone)
            .into()
    }
}
