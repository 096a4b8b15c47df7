// SPDX-License-Identifier: MPL-2.0
//! Building blocks of the detector screen.
//!
//! # Components
//!
//! - [`upload_box`] - File intake through drag-and-drop or the file picker
//! - [`progress_indicator`] - Spinner shown while a request is outstanding
//! - [`result_display`] - Error or success panel for the last analysis

pub mod progress_indicator;
pub mod result_display;
pub mod upload_box;
