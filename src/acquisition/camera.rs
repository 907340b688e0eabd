// SPDX-License-Identifier: MPL-2.0
//! Still capture from a local camera.
//!
//! Capture needs the `camera` feature (nokhwa). Without it every attempt
//! fails with [`CameraError::Unsupported`], which the UI turns into an
//! alert like any other camera failure.

use super::{ImageOrigin, ImageSource};
use crate::error::CameraError;
use image_rs::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Name given to captured stills.
pub const CAPTURE_NAME: &str = "camera-capture.png";

/// Whether this build can talk to a camera at all.
#[must_use]
pub fn is_supported() -> bool {
    cfg!(feature = "camera")
}

/// Grabs one frame from the camera at `index` and encodes it as PNG.
///
/// # Errors
///
/// Returns a [`CameraError`] if the device is missing, access is refused,
/// no frame arrives or this build has no camera support.
pub fn capture_still(index: u32) -> Result<ImageSource, CameraError> {
    let frame = grab_frame(index)?;
    encode_frame(&frame)
}

/// [`capture_still`] on the blocking thread pool.
///
/// # Errors
///
/// Same as [`capture_still`].
pub async fn capture_still_async(index: u32) -> Result<ImageSource, CameraError> {
    tokio::task::spawn_blocking(move || capture_still(index))
        .await
        .map_err(|e| CameraError::CaptureFailed(e.to_string()))?
}

/// Encodes an RGB frame into a PNG [`ImageSource`].
///
/// # Errors
///
/// Fails on empty frames or when PNG encoding fails.
pub fn encode_frame(frame: &RgbImage) -> Result<ImageSource, CameraError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(CameraError::CaptureFailed("empty frame".into()));
    }

    let mut out = Cursor::new(Vec::new());
    frame
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

    Ok(ImageSource::new(
        ImageOrigin::Camera,
        CAPTURE_NAME,
        "image/png",
        out.into_inner(),
        frame.dimensions(),
    ))
}

#[cfg(feature = "camera")]
fn grab_frame(index: u32) -> Result<RgbImage, CameraError> {
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
    use nokhwa::Camera;

    ensure_camera_access()?;

    let to_camera_error = |e: nokhwa::NokhwaError| CameraError::from_message(&e.to_string());

    let requested =
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
    let mut camera =
        Camera::new(CameraIndex::Index(index), requested).map_err(to_camera_error)?;
    camera.open_stream().map_err(to_camera_error)?;

    let captured = camera
        .frame()
        .and_then(|buffer| buffer.decode_image::<RgbFormat>())
        .map_err(to_camera_error);

    // The frame is already copied out; a failing stop must not lose it.
    let _ = camera.stop_stream();

    let decoded = captured?;
    let (width, height) = (decoded.width(), decoded.height());
    RgbImage::from_raw(width, height, decoded.into_raw())
        .ok_or_else(|| CameraError::CaptureFailed("frame size mismatch".into()))
}

/// AVFoundation refuses to open a device until access was requested once in
/// this process. Blocks until the user answers the system prompt.
#[cfg(all(feature = "camera", target_os = "macos"))]
fn ensure_camera_access() -> Result<(), CameraError> {
    if nokhwa::nokhwa_check() {
        return Ok(());
    }

    let (tx, rx) = crossbeam_channel::bounded(1);
    nokhwa::nokhwa_initialize(move |granted| {
        let _ = tx.send(granted);
    });

    match rx.recv() {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(CameraError::PermissionDenied),
    }
}

#[cfg(all(feature = "camera", not(target_os = "macos")))]
fn ensure_camera_access() -> Result<(), CameraError> {
    Ok(())
}

#[cfg(not(feature = "camera"))]
fn grab_frame(_index: u32) -> Result<RgbImage, CameraError> {
    Err(CameraError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_frame_produces_decodable_png() {
        let frame = RgbImage::from_pixel(6, 4, image_rs::Rgb([12, 200, 40]));
        let source = encode_frame(&frame).expect("encodes");

        assert_eq!(source.origin(), ImageOrigin::Camera);
        assert_eq!(source.content_type(), "image/png");
        assert_eq!(source.dimensions(), (6, 4));
        assert_eq!(source.name(), CAPTURE_NAME);

        let decoded = image_rs::load_from_memory(source.bytes()).expect("valid png");
        assert_eq!(decoded.width(), 6);
    }

    #[test]
    fn encode_frame_rejects_empty_frame() {
        let frame = RgbImage::new(0, 0);
        assert!(matches!(
            encode_frame(&frame),
            Err(CameraError::CaptureFailed(_))
        ));
    }

    #[cfg(not(feature = "camera"))]
    #[test]
    fn capture_without_feature_is_unsupported() {
        assert!(!is_supported());
        assert_eq!(capture_still(0).err(), Some(CameraError::Unsupported));
    }

    #[cfg(not(feature = "camera"))]
    #[tokio::test]
    async fn async_capture_without_feature_is_unsupported() {
        let result = capture_still_async(0).await;
        assert_eq!(result.err(), Some(CameraError::Unsupported));
    }

    #[cfg(all(feature = "camera", not(target_os = "macos")))]
    #[test]
    fn access_needs_no_prompt_outside_macos() {
        assert!(is_supported());
        assert_eq!(ensure_camera_access(), Ok(()));
    }
}
