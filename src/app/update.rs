// SPDX-License-Identifier: MPL-2.0
//! Update logic for the application.
//!
//! Each handler receives an [`UpdateContext`] borrowing the parts of `App`
//! it may touch and returns the follow-up task, if any.

use super::Message;
use crate::classifier::{ClassifyError, RemoteClassifier};
use crate::config::SPINNER_STEP_RADIANS;
use crate::detector::{AnalysisStart, Detector};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::{self, extensions, preview, Preview, SelectedImage};
use crate::ui::components::upload_box;
use crate::ui::notifications::{self, Notification};
use crate::ui::widgets::animated_spinner;
use iced::Task;
use std::path::PathBuf;

/// i18n key of the notification shown when the chosen file cannot be read.
pub const OPEN_FAILED_KEY: &str = "notification-open-failed";

/// Mutable view over the application state used by the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub detector: &'a mut Detector,
    pub upload: &'a mut upload_box::State,
    pub classifier: &'a Result<RemoteClassifier, ClassifyError>,
    pub notifications: &'a mut notifications::Manager,
    pub spinner_rotation: &'a mut f32,
}

pub fn handle_upload_message(
    ctx: &mut UpdateContext<'_>,
    message: upload_box::Message,
) -> Task<Message> {
    match ctx.upload.update(message, ctx.detector.is_loading()) {
        upload_box::Event::None => Task::none(),
        upload_box::Event::OpenPicker => open_picker(ctx.i18n),
        upload_box::Event::FileSelected(path) => load_image(ctx.detector.begin_intake(), path),
    }
}

fn open_picker(i18n: &I18n) -> Task<Message> {
    let title = i18n.tr("upload-dialog-title");
    let filter_name = i18n.tr("upload-filter-images");

    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .add_filter(filter_name, extensions::IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        |path| Message::Upload(upload_box::Message::Picked(path)),
    )
}

/// Reads the chosen file in the background, tagged with its intake ticket.
pub fn load_image(ticket: u64, path: PathBuf) -> Task<Message> {
    Task::perform(media::load_selected_image(path), move |result| {
        Message::ImageLoaded { ticket, result }
    })
}

pub fn handle_image_loaded(
    ctx: &mut UpdateContext<'_>,
    ticket: u64,
    result: Result<SelectedImage, Error>,
) -> Task<Message> {
    if !ctx.detector.is_current_intake(ticket) {
        tracing::debug!(ticket, "discarding superseded file read");
        return Task::none();
    }

    match result {
        Ok(image) => {
            let bytes = image.shared_bytes();
            let Some(notification) = ctx.detector.select(image) else {
                return Task::none();
            };
            ctx.notifications.push(notification);

            let generation = ctx.detector.generation();
            Task::perform(preview::decode_preview_async(bytes), move |result| {
                Message::PreviewDecoded { generation, result }
            })
        }
        Err(err) => {
            ctx.notifications
                .push(Notification::error(OPEN_FAILED_KEY).with_arg("message", err.to_string()));
            Task::none()
        }
    }
}

pub fn handle_preview_decoded(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: Result<Preview, Error>,
) -> Task<Message> {
    ctx.detector.apply_preview(generation, result);
    Task::none()
}

pub fn handle_analyze_pressed(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    match ctx.detector.begin_analysis() {
        AnalysisStart::Ready(image) => {
            *ctx.spinner_rotation = 0.0;
            match ctx.classifier {
                Ok(classifier) => {
                    let classifier = classifier.clone();
                    Task::perform(
                        async move { classifier.classify(&image).await },
                        Message::AnalysisFinished,
                    )
                }
                Err(err) => Task::done(Message::AnalysisFinished(Err(err.clone()))),
            }
        }
        AnalysisStart::NoImage(notification) => {
            ctx.notifications.push(notification);
            Task::none()
        }
        AnalysisStart::Busy => Task::none(),
    }
}

pub fn handle_analysis_finished(
    ctx: &mut UpdateContext<'_>,
    outcome: Result<crate::classifier::EmotionResult, ClassifyError>,
) -> Task<Message> {
    let notification = ctx.detector.finish_analysis(outcome);
    ctx.notifications.push(notification);
    Task::none()
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.detector.is_loading() {
        *ctx.spinner_rotation = animated_spinner::advance(*ctx.spinner_rotation, SPINNER_STEP_RADIANS);
    }
    ctx.notifications.tick();
    Task::none()
}
