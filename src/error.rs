// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(String),
    Camera(CameraError),
    Analysis(String),
}

/// Reasons a camera capture can fail.
/// Used to pick a user-facing, localized alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Built without camera support
    Unsupported,

    /// No device at the requested index
    NoDevice,

    /// The OS refused access to the device
    PermissionDenied,

    /// Device opened but no frame could be captured or encoded
    CaptureFailed(String),
}

impl CameraError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CameraError::Unsupported => "notification-camera-unsupported",
            CameraError::NoDevice
            | CameraError::PermissionDenied
            | CameraError::CaptureFailed(_) => "notification-camera-access-error",
        }
    }

    /// Categorizes a raw backend message.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("permission") || msg_lower.contains("denied") {
            return CameraError::PermissionDenied;
        }

        if msg_lower.contains("no device")
            || msg_lower.contains("not found")
            || msg_lower.contains("no such device")
            || msg_lower.contains("could not find")
        {
            return CameraError::NoDevice;
        }

        CameraError::CaptureFailed(msg.to_string())
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Unsupported => write!(f, "Camera not supported"),
            CameraError::NoDevice => write!(f, "No camera device found"),
            CameraError::PermissionDenied => write!(f, "Camera access denied"),
            CameraError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Camera(e) => write!(f, "Camera Error: {}", e),
            Error::Analysis(e) => write!(f, "Analysis Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CameraError> for Error {
    fn from(err: CameraError) -> Self {
        Error::Camera(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
