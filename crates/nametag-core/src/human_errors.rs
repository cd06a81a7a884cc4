// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing notifications.
//
// Every failure that crosses an async boundary (capture, OCR, file I/O,
// dispatch) ends up here and is shown as an alert instead of propagating.

use serde::{Deserialize, Serialize};

use crate::error::NametagError;
use crate::types::ErrorClass;

/// How prominently a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Confirmation of something that worked.
    Info,
    /// Nothing broke, but the user should look (e.g. no text found).
    Warning,
    /// The operation did not happen.
    Error,
}

/// A plain-English message with an actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Shown as the alert title.
    pub message: String,
    /// Shown as the alert body. May be empty.
    pub suggestion: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: String::new(),
            severity: Severity::Info,
        }
    }

    pub fn warning(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            severity: Severity::Warning,
        }
    }

    fn error(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            severity: Severity::Error,
        }
    }

    /// The "OCR answered but read nothing" case. Not an error.
    pub fn no_text_found() -> Self {
        Self::warning(
            "No text found in image.",
            "Center the badge in the frame and try again, or type the name by hand.",
        )
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.suggestion.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} {}", self.message, self.suggestion)
        }
    }
}

/// Convert a `NametagError` into something a person at a registration desk
/// can act on.
pub fn humanize_error(err: &NametagError) -> Notification {
    match err {
        NametagError::PermissionDenied => Notification::error(
            "We need your permission to use the camera.",
            "Grant camera access, then press Snap Badge again.",
        ),

        NametagError::CameraUnavailable => Notification::error(
            "The camera isn't ready yet.",
            "Wait a moment and press Snap Badge again.",
        ),

        NametagError::EncodingError(_) => Notification::error(
            "The photo couldn't be processed.",
            "Take the picture again.",
        ),

        // OCR failures are surfaced as warnings: the user can still type.
        NametagError::NetworkError(_) => Notification::warning(
            "Couldn't reach the text recognition service.",
            "Check your internet connection, then snap the badge again or type the name.",
        ),

        NametagError::ServiceError(detail) => Notification::warning(
            "The text recognition service couldn't read this photo.",
            format!("Check the OCR API key in Settings, or type the name by hand. ({detail})"),
        ),

        NametagError::StorageError(_) => Notification::warning(
            "Your changes couldn't be saved on this device.",
            "They will be kept until the app is closed.",
        ),

        NametagError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                Notification::error(
                    "The app doesn't have permission to write the attendee file.",
                    "Check the app's storage permissions and try again.",
                )
            } else {
                Notification::error(
                    "There was a problem writing the attendee file.",
                    "Try again. If this keeps happening, your device's storage may be full.",
                )
            }
        }

        NametagError::Serialization(_) => Notification::error(
            "The app had an internal data problem.",
            "Try again. If this keeps happening, please report it.",
        ),

        NametagError::MailUnavailable => Notification::error(
            "Mail is not available on this device.",
            "Set up a mail account in the Mail app, then try again.",
        ),

        NametagError::SharingUnavailable => Notification::error(
            "Sharing is not available on this device.",
            "Install an app that can receive files, then try again.",
        ),

        NametagError::UnsupportedPlatform => Notification::error(
            "Sending is only supported on iOS and Android.",
            "",
        ),

        NametagError::Bridge(_) => Notification::error(
            "A device feature didn't respond.",
            "Try again. Some features may not be available on all devices.",
        ),
    }
}

/// Classify a `NametagError` for presentation.
pub fn classify_error(err: &NametagError) -> ErrorClass {
    match err {
        NametagError::NetworkError(_)
        | NametagError::ServiceError(_)
        | NametagError::StorageError(_)
        | NametagError::Bridge(_)
        | NametagError::Io(_) => ErrorClass::Transient,

        NametagError::PermissionDenied
        | NametagError::CameraUnavailable
        | NametagError::MailUnavailable
        | NametagError::SharingUnavailable => ErrorClass::UserAction,

        NametagError::EncodingError(_)
        | NametagError::Serialization(_)
        | NametagError::UnsupportedPlatform => ErrorClass::Permanent,
    }
}
