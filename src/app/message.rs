// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::classifier::{ClassifyError, EmotionResult};
use crate::error::Error;
use crate::media::{Preview, SelectedImage};
use crate::ui::components::upload_box;
use crate::ui::notifications;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Upload(upload_box::Message),
    Notification(notifications::NotificationMessage),
    /// The Analyze button was pressed.
    AnalyzePressed,
    /// The chosen file has been read (or failed to). `ticket` is the intake
    /// ticket the read was started with.
    ImageLoaded {
        ticket: u64,
        result: Result<SelectedImage, Error>,
    },
    /// A preview decode finished for the selection of the given generation.
    PreviewDecoded {
        generation: u64,
        result: Result<Preview, Error>,
    },
    AnalysisFinished(Result<EmotionResult, ClassifyError>),
    Tick(Instant), // Spinner animation and notification auto-dismiss
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to select on startup.
    pub file_path: Option<String>,
    /// Optional classifier endpoint overriding `settings.toml` for this run.
    pub endpoint: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `EMOTION_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
