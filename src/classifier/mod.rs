// SPDX-License-Identifier: MPL-2.0
//! Remote emotion classification.
//!
//! The selected image is posted as a multipart form to a remote endpoint that
//! answers with JSON. The answer is normalized into an [`EmotionResult`]
//! regardless of which of the known field-name variants the service used.

pub mod client;
pub mod response;

pub use client::RemoteClassifier;
pub use response::{format_confidence, normalize, EmotionResult, UNKNOWN_EMOTION};

/// Message shown when a failure carries no description of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze emotion";

/// Errors that can occur while classifying an image.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// The request could not be built, sent, or its body could not be read.
    Transport(String),
    /// The service answered with a non-success HTTP status.
    Status(u16),
    /// The body was not valid JSON.
    InvalidResponse(String),
}

impl std::fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyError::Transport(msg) => write!(f, "{msg}"),
            ClassifyError::Status(code) => write!(f, "HTTP error! status: {code}"),
            ClassifyError::InvalidResponse(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ClassifyError {}

impl ClassifyError {
    /// Human-readable description, never empty.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}
