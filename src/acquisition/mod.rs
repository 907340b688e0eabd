// SPDX-License-Identifier: MPL-2.0
//! Image sources and how they are obtained.
//!
//! A plant photo reaches the app through the file picker, a drag-and-drop
//! or the camera. Each path ends in an [`ImageSource`]: the encoded bytes,
//! a content type and the decoded dimensions. Bytes that do not decode are
//! rejected before they can be selected.

pub mod camera;

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Supported image extensions.
pub mod extensions {
    /// Extensions offered by the file picker.
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif", "ico",
    ];
}

/// Fallback for files whose extension says nothing.
pub const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// Where an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOrigin {
    /// Chosen in the file picker or passed on the command line.
    File,
    /// Dropped onto the window.
    Drop,
    /// Captured from the camera.
    Camera,
}

impl ImageOrigin {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImageOrigin::File => "file",
            ImageOrigin::Drop => "drop",
            ImageOrigin::Camera => "camera",
        }
    }
}

/// An image ready to be previewed and analyzed.
#[derive(Debug, Clone)]
pub struct ImageSource {
    origin: ImageOrigin,
    name: String,
    content_type: String,
    /// Shared so clones for preview and analysis stay cheap.
    bytes: Arc<Vec<u8>>,
    dimensions: (u32, u32),
}

impl ImageSource {
    #[must_use]
    pub fn new(
        origin: ImageOrigin,
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
        dimensions: (u32, u32),
    ) -> Self {
        Self {
            origin,
            name: name.into(),
            content_type: content_type.into(),
            bytes: Arc::new(bytes),
            dimensions,
        }
    }

    #[must_use]
    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// Preview handle for the `image` widget.
    #[must_use]
    pub fn handle(&self) -> image::Handle {
        image::Handle::from_bytes(self.bytes.to_vec())
    }
}

/// Guesses a MIME type from the file extension.
#[must_use]
pub fn content_type_for_path(path: &Path) -> &'static str {
    let Some(extension) = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
    else {
        return UNKNOWN_CONTENT_TYPE;
    };

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        "json" => "application/json",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        _ => UNKNOWN_CONTENT_TYPE,
    }
}

/// Only `image/*` content types are accepted for selection.
#[must_use]
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Validates encoded bytes and wraps them in an [`ImageSource`].
///
/// Returns `Ok(None)` when the content type is not an image: such input is
/// ignored rather than reported.
///
/// # Errors
///
/// Returns [`Error::Image`] when the bytes cannot be decoded.
pub fn prepare(
    origin: ImageOrigin,
    name: impl Into<String>,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<Option<ImageSource>> {
    if !is_image_content_type(content_type) {
        return Ok(None);
    }

    let decoded = image_rs::load_from_memory(&bytes)?;
    let dimensions = decoded.dimensions();

    Ok(Some(ImageSource::new(
        origin,
        name,
        content_type,
        bytes,
        dimensions,
    )))
}

/// Reads and validates a file from disk.
///
/// Non-image files are skipped without reading them.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_path(path: &Path, origin: ImageOrigin) -> Result<Option<ImageSource>> {
    let content_type = content_type_for_path(path);
    if !is_image_content_type(content_type) {
        return Ok(None);
    }

    let bytes = std::fs::read(path)?;
    prepare(origin, display_name(path), content_type, bytes)
}

/// [`load_path`] on the blocking thread pool.
///
/// # Errors
///
/// Same as [`load_path`], plus a failure to join the worker.
pub async fn load_path_async(path: PathBuf, origin: ImageOrigin) -> Result<Option<ImageSource>> {
    tokio::task::spawn_blocking(move || load_path(&path, origin))
        .await
        .map_err(|e| Error::Io(e.to_string()))?
}

/// File name shown to the user, falling back to the full path.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
