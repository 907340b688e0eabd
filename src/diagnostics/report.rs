// SPDX-License-Identifier: MPL-2.0
//! JSON report built from the collected events.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DiagnosticEventKind;

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// When the report was generated (ISO 8601)
    pub generated_at: String,
    pub plant_doctor_version: String,
    /// When diagnostic collection started (ISO 8601)
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub event_count: usize,
    /// `std::env::consts::OS`
    pub os: String,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            plant_doctor_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
            os: std::env::consts::OS.to_string(),
        }
    }
}

/// An event with its offset from the start of collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    pub offset_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // u64 milliseconds cover any session
    pub fn new(timestamp: Instant, started_at: Instant, kind: DiagnosticEventKind) -> Self {
        Self {
            offset_ms: timestamp.saturating_duration_since(started_at).as_millis() as u64,
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub events: Vec<SerializableEvent>,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(metadata: ReportMetadata, events: Vec<SerializableEvent>) -> Self {
        Self { metadata, events }
    }
}
