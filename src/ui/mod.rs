// SPDX-License-Identifier: MPL-2.0
//! User interface components and styling.
//!
//! The UI follows the Elm-style "state down, messages up" pattern: components
//! expose a `view` built from borrowed state and report user input as
//! messages that the application routes back to them.
//!
//! - [`components`] - Upload box, progress indicator and result panel
//! - [`notifications`] - Toast notification system for user feedback
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod components;
pub mod design_tokens;
pub mod notifications;
pub mod styles;
pub mod theming;
pub mod widgets;
