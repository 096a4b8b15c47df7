// SPDX-License-Identifier: MPL-2.0
//! Normalization of the classifier's JSON answer.
//!
//! Two field-name pairs are known in the wild: `emotion`/`confidence` and
//! `predicted_emotion`/`score`. The first of each pair wins when both carry a
//! usable value. A value is usable when it is a non-empty string (emotion) or
//! a finite, non-zero number (confidence); anything else falls through to the
//! alternate field and then to the defaults.

use serde_json::Value;

/// Emotion label used when the answer names none.
pub const UNKNOWN_EMOTION: &str = "unknown";

const EMOTION_FIELDS: [&str; 2] = ["emotion", "predicted_emotion"];
const CONFIDENCE_FIELDS: [&str; 2] = ["confidence", "score"];

/// Normalized classification outcome. `confidence` is always within `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionResult {
    pub emotion: String,
    pub confidence: f64,
}

impl EmotionResult {
    pub fn new(emotion: impl Into<String>, confidence: f64) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            emotion: emotion.into(),
            confidence,
        }
    }

    /// Result for an answer that carried nothing usable.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_EMOTION, 0.0)
    }

    /// Confidence as a percentage with one decimal, e.g. `87.3%`.
    #[must_use]
    pub fn confidence_percent(&self) -> String {
        format_confidence(self.confidence)
    }
}

/// Formats a `[0, 1]` confidence as a percentage with one decimal place.
///
/// Ties round away from zero (`12.25` shows as `12.3%`).
#[must_use]
pub fn format_confidence(confidence: f64) -> String {
    let tenths = (confidence * 100.0 * 10.0).round();
    format!("{:.1}%", tenths / 10.0)
}

/// Builds an [`EmotionResult`] from the decoded JSON body.
#[must_use]
pub fn normalize(body: &Value) -> EmotionResult {
    let Some(fields) = body.as_object() else {
        return EmotionResult::unknown();
    };

    let emotion = EMOTION_FIELDS
        .iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_EMOTION);

    let confidence = CONFIDENCE_FIELDS
        .iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_f64))
        .find(|value| value.is_finite() && *value != 0.0)
        .unwrap_or(0.0);

    EmotionResult::new(emotion, confidence)
}
