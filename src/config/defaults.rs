// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.

// ==========================================================================
// Classifier Defaults
// ==========================================================================

/// Remote endpoint that receives the multipart upload and answers with JSON.
pub const DEFAULT_ENDPOINT: &str = "https://facial-emotions-prediction.onrender.com/predict";

/// Name of the multipart field carrying the image bytes.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// User agent sent with every classification request.
pub const DEFAULT_USER_AGENT: &str = concat!("EmotionLens/", env!("CARGO_PKG_VERSION"));

// ==========================================================================
// UI Defaults
// ==========================================================================

/// Interval of the animation/auto-dismiss tick in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Spinner rotation applied on every tick (radians).
pub const SPINNER_STEP_RADIANS: f32 = 0.35;

/// Maximum height of the preview image in the result panel.
pub const PREVIEW_MAX_HEIGHT: f32 = 192.0;
