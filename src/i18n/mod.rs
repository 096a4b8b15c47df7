// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Translation files embedded at compile time from `assets/i18n/`
//! - Placeable substitution (`tr_with_args`) for notification texts
//! - Fallback to default locale when translations are missing

pub mod fluent;
