// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// User-initiated actions worth recording.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    /// An image was offered (drop, file picker, camera or CLI).
    SelectImage {
        /// `file`, `drop` or `camera`.
        source: String,
    },

    /// The pending image was discarded.
    ClearSelection,

    /// The native file dialog was opened.
    OpenFilePicker,

    /// A camera capture was requested.
    TakePhoto,

    /// Analysis was started for the pending image.
    SubmitAnalysis,

    /// The user asked to analyze another plant.
    ResetResults,
}

/// Application state transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppStateEvent {
    /// An image passed validation and is awaiting submission.
    ImageSelected { width: u32, height: u32, bytes: usize },

    /// A diagnosis is on screen.
    AnalysisCompleted {
        confidence: f64,
        tier: String,
        duration_ms: u64,
    },

    /// Back to an empty acquisition screen.
    AcquisitionReset,
}

/// Categories of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// A dropped or picked image could not be read or decoded.
    ImageLoad,
    /// settings.toml could not be parsed.
    ConfigurationIssue,
    /// Persisted UI state could not be read or written.
    StateIssue,
    Other,
}

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Camera unavailable, denied or unsupported.
    CameraError,
    /// The analyzer failed to produce a result.
    AnalysisError,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with the moment it occurred.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// Monotonic clock, used for offsets in reports
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: UserAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    AppState {
        state: AppStateEvent,
    },
    Warning {
        event: WarningEvent,
    },
    Error {
        event: ErrorEvent,
    },
}
