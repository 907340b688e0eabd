// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::diagnostics::{ErrorType, WarningType};
use crate::error::CameraError;
use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Green, 3s.
    #[default]
    Success,
    /// Blue, 3s.
    Info,
    /// Orange, 5s.
    Warning,
    /// Red, stays until dismissed.
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// A notification to be displayed to the user.
///
/// The message is an i18n key resolved at render time, so toasts follow
/// the current locale.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
    warning_type: Option<WarningType>,
    error_type: Option<ErrorType>,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
            warning_type: None,
            error_type: None,
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// The alert shown when "Take Photo" fails.
    pub fn camera_failure(err: &CameraError) -> Self {
        Self::error(err.i18n_key()).with_error_type(ErrorType::CameraError)
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    /// Category recorded in diagnostics for warnings.
    #[must_use]
    pub fn with_warning_type(mut self, warning_type: WarningType) -> Self {
        self.warning_type = Some(warning_type);
        self
    }

    /// Category recorded in diagnostics for errors.
    #[must_use]
    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = Some(error_type);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    #[must_use]
    pub fn warning_type(&self) -> Option<WarningType> {
        self.warning_type
    }

    #[must_use]
    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }

    /// Whether the notification has outlived its severity's duration at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.severity
            .auto_dismiss_duration()
            .is_some_and(|duration| now.saturating_duration_since(self.created_at) >= duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            Severity::Success.color(),
            Severity::Info.color(),
            Severity::Warning.color(),
            Severity::Error.color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn error_severity_has_no_auto_dismiss() {
        assert!(Severity::Error.auto_dismiss_duration().is_none());
    }

    #[test]
    fn warning_duration_is_longer_than_success() {
        let success_duration = Severity::Success.auto_dismiss_duration().unwrap();
        let warning_duration = Severity::Warning.auto_dismiss_duration().unwrap();
        assert!(warning_duration > success_duration);
    }

    #[test]
    fn warning_expires_after_five_seconds() {
        let notification = Notification::warning("notification-image-load-error");
        let start = Instant::now();

        assert!(!notification.is_expired_at(start + Duration::from_secs(4)));
        assert!(notification.is_expired_at(start + Duration::from_secs(6)));
    }

    #[test]
    fn error_never_expires() {
        let notification = Notification::error("notification-analysis-error");
        assert!(!notification.is_expired_at(Instant::now() + Duration::from_secs(3600)));
    }

    #[test]
    fn camera_failure_uses_error_key_and_type() {
        let unsupported = Notification::camera_failure(&CameraError::Unsupported);
        assert_eq!(unsupported.severity(), Severity::Error);
        assert_eq!(unsupported.message_key(), "notification-camera-unsupported");
        assert_eq!(unsupported.error_type(), Some(ErrorType::CameraError));

        let denied = Notification::camera_failure(&CameraError::PermissionDenied);
        assert_eq!(denied.message_key(), "notification-camera-access-error");
    }

    #[test]
    fn notification_builder_pattern_works() {
        let notification = Notification::warning("notification-image-load-error")
            .with_arg("name", "leaf.png")
            .with_warning_type(WarningType::ImageLoad);

        assert_eq!(notification.message_args().len(), 1);
        assert_eq!(notification.warning_type(), Some(WarningType::ImageLoad));
        assert_eq!(notification.error_type(), None);
    }
}
