// SPDX-License-Identifier: MPL-2.0
//! `plant_doctor` helps diagnose crop diseases from a single photo.
//!
//! The user drops an image, picks one from disk or takes one with a camera;
//! the image is sent to an analyzer and the diagnosis is shown with a
//! color-coded confidence tier, a description and a suggested treatment.
//!
//! # Modules
//!
//! - [`acquisition`] - Turning files, drops and camera frames into images
//! - [`diagnosis`] - Result model, confidence tiers and the analyzer seam
//! - [`app`] - Application state, update loop and persistence
//! - [`ui`] - Screens, widgets and styling
//! - [`diagnostics`] - In-memory event log for troubleshooting
//! - [`i18n`] - Fluent-based localization

#![doc(html_root_url = "https://docs.rs/plant_doctor/0.1.0")]

pub mod acquisition;
pub mod app;
pub mod diagnosis;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod icon;
pub mod ui;
