// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Nametag.

use thiserror::Error;

/// Top-level error type for all Nametag operations.
#[derive(Debug, Error)]
pub enum NametagError {
    // -- Capture errors --
    #[error("camera access has not been granted")]
    PermissionDenied,

    #[error("camera is not ready")]
    CameraUnavailable,

    #[error("image encoding failed: {0}")]
    EncodingError(String),

    // -- OCR errors --
    #[error("OCR request failed: {0}")]
    NetworkError(String),

    #[error("OCR service reported an error: {0}")]
    ServiceError(String),

    // -- Storage / persistence --
    #[error("settings storage error: {0}")]
    StorageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Export errors --
    #[error("mail composer is not available on this device")]
    MailUnavailable,

    #[error("sharing is not available on this device")]
    SharingUnavailable,

    #[error("exporting is not supported on this platform")]
    UnsupportedPlatform,

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NametagError>;
