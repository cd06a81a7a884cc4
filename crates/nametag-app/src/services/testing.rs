// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test doubles shared by the service tests.

use std::sync::{Arc, Mutex};

use nametag_bridge::traits::{NativeCamera, NativeMailComposer, NativeShare};
use nametag_bridge::{MailRequest, PlatformBridge, ShareRequest};
use nametag_core::error::Result;
use nametag_core::types::{CameraPermission, Platform};

/// A bridge that records every mail and share request it receives.
#[derive(Default)]
pub struct RecordingBridge {
    pub platform: Option<Platform>,
    pub mail_available: bool,
    pub share_available: bool,
    pub mails: Mutex<Vec<MailRequest>>,
    pub shares: Mutex<Vec<ShareRequest>>,
}

impl RecordingBridge {
    pub fn on(platform: Platform, available: bool) -> Arc<Self> {
        Arc::new(Self {
            platform: Some(platform),
            mail_available: available,
            share_available: available,
            ..Default::default()
        })
    }
}

impl NativeCamera for RecordingBridge {
    fn camera_permission(&self) -> CameraPermission {
        CameraPermission::Denied
    }

    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
}

impl NativeMailComposer for RecordingBridge {
    fn is_mail_available(&self) -> bool {
        self.mail_available
    }

    fn compose_mail(&self, request: &MailRequest) -> Result<()> {
        self.mails.lock().unwrap().push(request.clone());
        Ok(())
    }
}

impl NativeShare for RecordingBridge {
    fn is_sharing_available(&self) -> bool {
        self.share_available
    }

    fn share_file(&self, request: &ShareRequest) -> Result<()> {
        self.shares.lock().unwrap().push(request.clone());
        Ok(())
    }
}

impl PlatformBridge for RecordingBridge {
    fn platform_name(&self) -> &str {
        "recording"
    }

    fn platform(&self) -> Platform {
        self.platform.unwrap_or(Platform::Other)
    }
}
