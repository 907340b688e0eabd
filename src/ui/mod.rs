// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! screen owns its state, renders from it and reports what happened to the
//! parent through an effect or event.
//!
//! # Screens
//!
//! - [`acquisition`] - Drop zone, file picker, camera capture and preview
//! - [`results`] - Diagnosis presentation with the reset action
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`icons`] - SVG icon loading and rendering
//! - [`notifications`] - Toast notification system for user feedback

pub mod acquisition;
pub mod design_tokens;
pub mod icons;
pub mod notifications;
pub mod results;
pub mod styles;
pub mod theming;
pub mod widgets;
