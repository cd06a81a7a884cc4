// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture service — take a still from the native camera and turn it into an
// upload-ready JPEG.
//
// The transform is pure and never retried: if decoding or encoding fails the
// capture attempt is aborted and nothing is forwarded.

use std::sync::Arc;

use nametag_bridge::PlatformBridge;
use nametag_core::AppConfig;
use nametag_core::error::{NametagError, Result};
use nametag_core::types::{CameraPermission, CapturedImage};
use tracing::{info, instrument, warn};

use crate::image::ImageProcessor;

/// Drives the camera and prepares the photo for OCR.
pub struct CaptureService {
    bridge: Arc<dyn PlatformBridge>,
    target_width: u32,
    jpeg_quality: u8,
}

impl CaptureService {
    pub fn new(bridge: Arc<dyn PlatformBridge>, target_width: u32, jpeg_quality: u8) -> Self {
        Self {
            bridge,
            target_width,
            jpeg_quality,
        }
    }

    pub fn from_config(bridge: Arc<dyn PlatformBridge>, config: &AppConfig) -> Self {
        Self::new(bridge, config.capture_target_width, config.jpeg_quality)
    }

    /// Take a picture and return the resized, compressed artifact.
    ///
    /// The caller must already have asked for camera permission.
    #[instrument(skip(self), fields(target_width = self.target_width))]
    pub async fn capture(&self) -> Result<CapturedImage> {
        match self.bridge.camera_permission() {
            CameraPermission::Granted => {}
            other => {
                warn!(permission = ?other, "camera not authorised");
                return Err(NametagError::PermissionDenied);
            }
        }

        let frame = match self.bridge.capture_image() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                warn!("camera not ready");
                return Err(NametagError::CameraUnavailable);
            }
            Err(e) => {
                warn!(error = %e, "camera capture failed");
                return Err(NametagError::CameraUnavailable);
            }
        };
        info!(bytes = frame.len(), "photo captured");

        let (width, quality) = (self.target_width, self.jpeg_quality);
        tokio::task::spawn_blocking(move || prepare_upload(&frame, width, quality))
            .await
            .map_err(|e| NametagError::EncodingError(format!("image task failed: {e}")))?
    }
}

/// Decode `frame`, shrink it to `target_width` (never enlarging), and
/// re-encode as JPEG at `quality`.
pub fn prepare_upload(frame: &[u8], target_width: u32, quality: u8) -> Result<CapturedImage> {
    let processor = ImageProcessor::from_bytes(frame)?.downscale_to_width(target_width);
    let (width, height) = (processor.width(), processor.height());
    let bytes = processor.to_jpeg_bytes(quality)?;
    info!(width, height, bytes = bytes.len(), "upload artifact ready");
    Ok(CapturedImage {
        bytes,
        width,
        height,
    })
}
