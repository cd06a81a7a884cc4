// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use std::path::PathBuf;

use nametag_core::error::Result;
use nametag_core::types::{CameraPermission, Platform};

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: NativeCamera + NativeMailComposer + NativeShare + Send + Sync {
    /// Human-readable platform name (e.g. "iOS 17", "Android 14").
    fn platform_name(&self) -> &str;

    /// Which export transport family this device belongs to.
    fn platform(&self) -> Platform;
}

/// Still capture from the device camera.
///
/// Permission prompting is the UI's job; the bridge only reports the
/// current state.
pub trait NativeCamera {
    /// Current camera authorisation.
    fn camera_permission(&self) -> CameraPermission;

    /// Take a still picture and return the encoded bytes (JPEG, PNG, ...).
    /// Returns Ok(None) if the camera handle is not ready.
    fn capture_image(&self) -> Result<Option<Vec<u8>>>;
}

/// Compose an email with attachments in the system mail client.
pub trait NativeMailComposer {
    /// Whether a mail account is configured and the composer can open.
    fn is_mail_available(&self) -> bool;

    /// Present the composer pre-filled from `request`.
    /// Returns Ok(()) once presented (the user may still cancel).
    fn compose_mail(&self, request: &MailRequest) -> Result<()>;
}

/// Hand a file to other apps via the OS share sheet.
pub trait NativeShare {
    /// Whether the share sheet can be shown.
    fn is_sharing_available(&self) -> bool;

    /// Present the share sheet for `request.path`.
    fn share_file(&self, request: &ShareRequest) -> Result<()>;
}

/// Arguments for [`NativeMailComposer::compose_mail`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRequest {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}

/// Arguments for [`NativeShare::share_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub path: PathBuf,
    pub mime_type: String,
    pub dialog_title: String,
    /// Apple uniform type identifier; ignored on Android.
    pub uti: String,
    /// Text accompanying the file.
    pub message: String,
}
