// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! Parts of the application log through a cloneable [`DiagnosticsHandle`];
//! the collector drains the channel into a circular buffer on each UI tick.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::report::{DiagnosticReport, ReportMetadata, SerializableEvent};
use super::{
    AppStateEvent, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, UserAction,
    WarningEvent,
};
use crate::error::{Error, Result};

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Sends never block: when the channel is full the event
/// is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log_action(&self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    pub fn log_action_with_details(&self, action: UserAction, details: Option<String>) {
        self.send(DiagnosticEventKind::UserAction { action, details });
    }

    pub fn log_state(&self, state: AppStateEvent) {
        self.send(DiagnosticEventKind::AppState { state });
    }

    pub fn log_warning(&self, event: WarningEvent) {
        self.send(DiagnosticEventKind::Warning { event });
    }

    pub fn log_error(&self, event: ErrorEvent) {
        self.send(DiagnosticEventKind::Error { event });
    }

    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// Monotonic start, for event offsets
    collection_started_at: Instant,
    /// Wall-clock start, for report metadata
    collection_started_at_utc: DateTime<Utc>,
}

/// Channel slots between two drains.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(super::DEFAULT_BUFFER_CAPACITY)
    }
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Exports all buffered events as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Writes the JSON report to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be written.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let json = self
            .export_json()
            .map_err(|err| Error::Io(err.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        if let Err(err) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)] // u64 milliseconds cover any session
    fn build_report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.kind.clone(),
                )
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            self.collection_started_at.elapsed().as_millis() as u64,
            events.len(),
        );

        DiagnosticReport::new(metadata, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{ErrorType, WarningType};
    use tempfile::tempdir;

    #[test]
    fn handle_events_reach_buffer_after_process_pending() {
        let mut collector = DiagnosticsCollector::new(10);
        let handle = collector.handle();

        handle.log_action(UserAction::TakePhoto);
        handle.log_warning(WarningEvent::new(WarningType::ImageLoad, "broken.png"));
        assert!(collector.is_empty(), "events stay in the channel until drained");

        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn buffer_keeps_only_latest_events() {
        let mut collector = DiagnosticsCollector::new(2);
        let handle = collector.handle();

        handle.log_action(UserAction::OpenFilePicker);
        handle.log_action(UserAction::SubmitAnalysis);
        handle.log_action(UserAction::ResetResults);
        collector.process_pending();

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticEventKind::UserAction {
                    action: UserAction::SubmitAnalysis,
                    details: None,
                },
                DiagnosticEventKind::UserAction {
                    action: UserAction::ResetResults,
                    details: None,
                },
            ]
        );
    }

    #[test]
    fn full_channel_drops_events_without_blocking() {
        let mut collector = DiagnosticsCollector::new(1000);
        let handle = collector.handle();

        for _ in 0..(DEFAULT_CHANNEL_CAPACITY + 20) {
            handle.log_action(UserAction::ClearSelection);
        }
        collector.process_pending();

        assert_eq!(collector.len(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn export_json_contains_metadata_and_events() {
        let mut collector = DiagnosticsCollector::new(10);
        let handle = collector.handle();
        handle.log_error(ErrorEvent::new(
            ErrorType::CameraError,
            "notification-camera-access-error",
        ));
        collector.process_pending();

        let json = collector.export_json().expect("export should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["metadata"]["event_count"], 1);
        assert_eq!(value["events"][0]["type"], "error");
        assert_eq!(value["events"][0]["event"]["error_type"], "camera_error");
    }

    #[test]
    fn export_to_file_writes_report() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("diagnostics.json");

        let mut collector = DiagnosticsCollector::new(10);
        collector.handle().log_action(UserAction::ResetResults);
        collector.process_pending();

        collector.export_to_file(&path).expect("export should succeed");

        let content = fs::read_to_string(&path).expect("read report");
        assert!(content.contains("reset_results"));
        assert!(!path.with_extension("json.tmp").exists());
    }
}
