// SPDX-License-Identifier: MPL-2.0
//! In-process activity log.
//!
//! Captures user actions, state transitions, warnings and errors in a
//! memory-bounded circular buffer. The log can be exported as a JSON report
//! (see `--diagnostics-out`).
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with fixed capacity
//! - [`DiagnosticEvent`]: Timestamped event
//! - [`DiagnosticsHandle`]: Cloneable, non-blocking sender
//! - [`DiagnosticsCollector`]: Owns the buffer and builds reports

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{CircularBuffer, DEFAULT_BUFFER_CAPACITY};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    AppStateEvent, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, ErrorType, UserAction,
    WarningEvent, WarningType,
};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};
