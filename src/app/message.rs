// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::diagnosis::analyzer::AnalysisError;
use crate::diagnosis::DiagnosisResult;
use crate::ui::acquisition;
use crate::ui::notifications;
use crate::ui::results;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Acquisition(acquisition::Message),
    Results(results::Message),
    Notification(notifications::NotificationMessage),
    /// Result from the open file dialog.
    FilePicked(Option<PathBuf>),
    AnalysisCompleted {
        result: Result<DiagnosisResult, AnalysisError>,
        duration_ms: u64,
    },
    Tick(Instant), // Notification auto-dismiss and diagnostics draining
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to preselect on startup.
    pub file_path: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional data directory override (for state files).
    /// Takes precedence over `PLANT_DOCTOR_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `PLANT_DOCTOR_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Where to write the diagnostics report when the window closes.
    pub diagnostics_out: Option<PathBuf>,
}
