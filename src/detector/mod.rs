// SPDX-License-Identifier: MPL-2.0
//! Interaction state of the emotion detector.
//!
//! [`Detector`] owns everything the screen renders: the selected image, its
//! preview, the loading flag, and the outcome of the last analysis. All
//! transitions go through its methods, which return the notification to show
//! so that the caller only has to forward it to the toast manager.
//!
//! ```text
//! Idle ──select──▶ FileSelected ──begin──▶ Analyzing ──finish──▶ Succeeded | Failed
//!                       ▲                                              │
//!                       └──────────────────select──────────────────────┘
//! ```
//!
//! At most one of result and error is set at any time. Preview decodes are
//! tagged with the selection generation they were started for, and results
//! from an older generation are dropped. File reads carry an intake ticket in
//! the same way: only the most recently requested file may become the
//! selection, whatever order the reads complete in.

use crate::classifier::{ClassifyError, EmotionResult};
use crate::media::{Preview, SelectedImage};
use crate::ui::notifications::Notification;

pub const IMAGE_UPLOADED_KEY: &str = "notification-image-uploaded";
pub const NO_IMAGE_KEY: &str = "notification-no-image";
pub const ANALYSIS_COMPLETE_KEY: &str = "notification-analysis-complete";
pub const ANALYSIS_FAILED_KEY: &str = "notification-analysis-failed";

/// Coarse state of the flow, derived from [`Detector`]'s fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FileSelected,
    Analyzing,
    Succeeded,
    Failed,
}

/// Outcome of [`Detector::begin_analysis`].
#[derive(Debug, Clone)]
pub enum AnalysisStart {
    /// The request may be sent for this image.
    Ready(SelectedImage),
    /// Nothing is selected; show the warning, nothing else changed.
    NoImage(Notification),
    /// A request is already outstanding.
    Busy,
}

#[derive(Debug, Default)]
pub struct Detector {
    selected: Option<SelectedImage>,
    preview: Option<Preview>,
    generation: u64,
    intake: u64,
    is_loading: bool,
    result: Option<EmotionResult>,
    error: Option<String>,
}

impl Detector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Analyzing
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.result.is_some() {
            Phase::Succeeded
        } else if self.selected.is_some() {
            Phase::FileSelected
        } else {
            Phase::Idle
        }
    }

    /// Hands out the ticket for a file read that is about to start.
    ///
    /// Any read started earlier becomes stale.
    pub fn begin_intake(&mut self) -> u64 {
        self.intake = self.intake.wrapping_add(1);
        self.intake
    }

    /// Whether a read tagged with `ticket` is the latest one requested.
    #[must_use]
    pub fn is_current_intake(&self, ticket: u64) -> bool {
        ticket == self.intake
    }

    /// Replaces the selection and clears the previous outcome.
    ///
    /// Returns `None` (and changes nothing) while a request is outstanding;
    /// this only happens when a file read started earlier completes late.
    pub fn select(&mut self, image: SelectedImage) -> Option<Notification> {
        if self.is_loading {
            tracing::debug!(path = %image.path().display(), "ignoring selection during analysis");
            return None;
        }

        tracing::info!(path = %image.path().display(), mime = image.mime(), "image selected");
        self.generation = self.generation.wrapping_add(1);
        self.selected = Some(image);
        self.preview = None;
        self.result = None;
        self.error = None;
        Some(Notification::info(IMAGE_UPLOADED_KEY))
    }

    /// Generation of the current selection, to tag preview decodes with.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stores a decoded preview if it belongs to the current selection.
    ///
    /// Returns `true` when the preview was applied. A failed decode leaves the
    /// preview empty.
    pub fn apply_preview(&mut self, generation: u64, preview: crate::error::Result<Preview>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale preview");
            return false;
        }
        match preview {
            Ok(preview) => {
                self.preview = Some(preview);
                true
            }
            Err(err) => {
                tracing::warn!("preview unavailable: {err}");
                self.preview = None;
                false
            }
        }
    }

    /// Starts an analysis of the current selection.
    pub fn begin_analysis(&mut self) -> AnalysisStart {
        if self.is_loading {
            return AnalysisStart::Busy;
        }
        let Some(image) = self.selected.clone() else {
            return AnalysisStart::NoImage(Notification::warning(NO_IMAGE_KEY));
        };

        self.is_loading = true;
        self.error = None;
        self.result = None;
        AnalysisStart::Ready(image)
    }

    /// Records the outcome of the outstanding request.
    pub fn finish_analysis(&mut self, outcome: Result<EmotionResult, ClassifyError>) -> Notification {
        self.is_loading = false;
        match outcome {
            Ok(result) => {
                tracing::info!(emotion = %result.emotion, confidence = result.confidence, "analysis complete");
                let notification =
                    Notification::success(ANALYSIS_COMPLETE_KEY).with_arg("emotion", result.emotion.clone());
                self.error = None;
                self.result = Some(result);
                notification
            }
            Err(err) => {
                let message = err.user_message();
                tracing::error!("analysis failed: {message}");
                self.result = None;
                self.error = Some(message.clone());
                Notification::error(ANALYSIS_FAILED_KEY).with_arg("message", message)
            }
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn result(&self) -> Option<&EmotionResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the Analyze control is offered.
    #[must_use]
    pub fn can_analyze(&self) -> bool {
        self.selected.is_some() && !self.is_loading
    }
}
