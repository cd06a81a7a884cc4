// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Nametag scan-to-export pipeline.

use serde::{Deserialize, Serialize};

/// User-editable settings, persisted on every change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Recipient of the exported attendee list.
    pub email: String,
    /// Key for the remote OCR service.
    pub ocr_api_key: String,
}

/// A resized, JPEG-encoded photo ready for upload.
///
/// Lives only between capture and OCR submission (or discard); never
/// persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// Encoded JPEG bytes.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CapturedImage {
    pub const MIME_TYPE: &'static str = "image/jpeg";
    pub const FILE_NAME: &'static str = "photo.jpg";
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("bytes", &self.bytes.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Text recognised in a single OCR request.
///
/// `raw_text` is `None` when the service answered but found nothing to read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OcrResult {
    pub raw_text: Option<String>,
}

/// Everything a transport needs to deliver one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub subject: String,
    /// Human-readable summary used as mail body / share message.
    pub body: String,
    pub csv_content: String,
    pub recipient: String,
}

/// The operating system the app is running on, as far as export is
/// concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Ios,
    Android,
    /// Anything else (desktop, CI). No export transport exists here.
    Other,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ios => f.write_str("iOS"),
            Self::Android => f.write_str("Android"),
            Self::Other => f.write_str("other"),
        }
    }
}

/// Camera authorisation as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraPermission {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

/// Classification of errors for presentation. Nothing in Nametag retries
/// automatically; the class only tells the UI what to suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Network blip or remote hiccup. Pressing the button again may work.
    Transient,
    /// User must do something first (grant permission, point the camera).
    UserAction,
    /// Will not succeed on this device or with this input.
    Permanent,
}
