// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// The camera can be pointed at an image file so the scan pipeline runs
// end-to-end on a desktop. Mail and share are never available here.

use std::path::PathBuf;

use nametag_core::error::{NametagError, Result};
use nametag_core::types::{CameraPermission, Platform};

use crate::traits::*;

/// Bridge returned on non-mobile platforms.
#[derive(Debug, Clone, Default)]
pub struct StubBridge {
    still_image: Option<PathBuf>,
}

impl StubBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub whose camera "captures" the image stored at `path`.
    pub fn with_still_image(path: impl Into<PathBuf>) -> Self {
        Self {
            still_image: Some(path.into()),
        }
    }
}

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn platform(&self) -> Platform {
        Platform::Other
    }
}

impl NativeCamera for StubBridge {
    fn camera_permission(&self) -> CameraPermission {
        if self.still_image.is_some() {
            CameraPermission::Granted
        } else {
            CameraPermission::Undetermined
        }
    }

    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        match &self.still_image {
            Some(path) => {
                tracing::debug!(path = %path.display(), "stub camera reading still image");
                Ok(Some(std::fs::read(path)?))
            }
            None => {
                tracing::warn!("NativeCamera::capture_image called on stub bridge");
                Ok(None)
            }
        }
    }
}

impl NativeMailComposer for StubBridge {
    fn is_mail_available(&self) -> bool {
        false
    }

    fn compose_mail(&self, _request: &MailRequest) -> Result<()> {
        tracing::warn!("NativeMailComposer::compose_mail called on stub bridge");
        Err(NametagError::UnsupportedPlatform)
    }
}

impl NativeShare for StubBridge {
    fn is_sharing_available(&self) -> bool {
        false
    }

    fn share_file(&self, _request: &ShareRequest) -> Result<()> {
        tracing::warn!("NativeShare::share_file called on stub bridge");
        Err(NametagError::UnsupportedPlatform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_stub_has_no_camera() {
        let bridge = StubBridge::new();
        assert_eq!(bridge.camera_permission(), CameraPermission::Undetermined);
        assert!(bridge.capture_image().unwrap().is_none());
        assert_eq!(bridge.platform(), Platform::Other);
    }

    #[test]
    fn still_image_is_returned_as_capture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("badge.jpg");
        std::fs::write(&path, b"not really a jpeg").unwrap();

        let bridge = StubBridge::with_still_image(&path);
        assert_eq!(bridge.camera_permission(), CameraPermission::Granted);
        assert_eq!(
            bridge.capture_image().unwrap().as_deref(),
            Some(&b"not really a jpeg"[..])
        );
    }

    #[test]
    fn transports_are_unavailable() {
        let bridge = StubBridge::new();
        assert!(!bridge.is_mail_available());
        assert!(!bridge.is_sharing_available());
    }
}
