// SPDX-License-Identifier: MPL-2.0
//! `emotion_lens` is a small desktop front-end for a remote facial emotion
//! classifier, built with the Iced GUI framework.
//!
//! The user picks or drops a photo, the photo is posted to the classifier as
//! a multipart upload, and the detected emotion is shown with its confidence.
//! Preferences live in a `settings.toml` file and the interface is translated
//! with Fluent.

pub mod app;
pub mod classifier;
pub mod config;
pub mod detector;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;
