// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dispatch gateway: deliver the attendee CSV through whichever transport
// the device offers.
//
// iOS gets the mail composer with the CSV attached; Android gets the share
// sheet. There is no fallback from one to the other. Elsewhere export fails
// with `UnsupportedPlatform` before anything touches the disk.
//
// The CSV is written to one fixed path and overwritten on every export. It
// is left in place afterwards, whatever the outcome.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nametag_bridge::{MailRequest, PlatformBridge, ShareRequest};
use nametag_core::error::{NametagError, Result};
use nametag_core::types::{ExportPayload, Platform};
use tracing::{error, info, instrument, warn};

pub const CSV_MIME_TYPE: &str = "text/csv";
pub const CSV_UTI: &str = "public.comma-separated-values-text";
pub const SHARE_DIALOG_TITLE: &str = "Share attendees CSV";

/// Which transport delivered an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    MailCompose,
    ShareSheet,
}

/// An outbound channel for the exported CSV.
pub trait Transport: Send + Sync {
    fn kind(&self) -> TransportKind;

    /// Capability probe, checked before any file is written.
    fn is_available(&self) -> bool;

    /// The error reported when [`Transport::is_available`] is false.
    fn unavailable_error(&self) -> NametagError;

    /// Hand `csv_path` and the payload to the OS.
    fn send(&self, csv_path: &Path, payload: &ExportPayload) -> Result<()>;
}

/// Mail composer with the CSV attached.
pub struct MailComposeTransport {
    bridge: Arc<dyn PlatformBridge>,
}

impl MailComposeTransport {
    pub fn new(bridge: Arc<dyn PlatformBridge>) -> Self {
        Self { bridge }
    }
}

impl Transport for MailComposeTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::MailCompose
    }

    fn is_available(&self) -> bool {
        self.bridge.is_mail_available()
    }

    fn unavailable_error(&self) -> NametagError {
        NametagError::MailUnavailable
    }

    fn send(&self, csv_path: &Path, payload: &ExportPayload) -> Result<()> {
        self.bridge.compose_mail(&MailRequest {
            recipients: vec![payload.recipient.clone()],
            subject: payload.subject.clone(),
            body: payload.body.clone(),
            attachments: vec![csv_path.to_path_buf()],
        })
    }
}

/// Generic share sheet carrying the CSV and the summary as message.
pub struct ShareSheetTransport {
    bridge: Arc<dyn PlatformBridge>,
}

impl ShareSheetTransport {
    pub fn new(bridge: Arc<dyn PlatformBridge>) -> Self {
        Self { bridge }
    }
}

impl Transport for ShareSheetTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::ShareSheet
    }

    fn is_available(&self) -> bool {
        self.bridge.is_sharing_available()
    }

    fn unavailable_error(&self) -> NametagError {
        NametagError::SharingUnavailable
    }

    fn send(&self, csv_path: &Path, payload: &ExportPayload) -> Result<()> {
        self.bridge.share_file(&ShareRequest {
            path: csv_path.to_path_buf(),
            mime_type: CSV_MIME_TYPE.into(),
            dialog_title: SHARE_DIALOG_TITLE.into(),
            uti: CSV_UTI.into(),
            message: payload.body.clone(),
        })
    }
}

/// The transport native to `bridge`'s platform, if it has one.
pub fn transport_for(bridge: Arc<dyn PlatformBridge>) -> Option<Box<dyn Transport>> {
    match bridge.platform() {
        Platform::Ios => Some(Box::new(MailComposeTransport::new(bridge))),
        Platform::Android => Some(Box::new(ShareSheetTransport::new(bridge))),
        Platform::Other => None,
    }
}

/// Writes the CSV and invokes the selected transport.
pub struct DispatchGateway {
    transport: Option<Box<dyn Transport>>,
    csv_path: PathBuf,
}

impl DispatchGateway {
    /// `transport` is `None` on platforms without an export channel.
    pub fn new(transport: Option<Box<dyn Transport>>, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            csv_path: csv_path.into(),
        }
    }

    pub fn for_bridge(bridge: Arc<dyn PlatformBridge>, csv_path: impl Into<PathBuf>) -> Self {
        Self::new(transport_for(bridge), csv_path)
    }

    /// Where the CSV is written.
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    #[instrument(skip_all, fields(path = %self.csv_path.display()))]
    pub async fn dispatch(&self, payload: &ExportPayload) -> Result<TransportKind> {
        let Some(transport) = self.transport.as_deref() else {
            warn!("no export transport on this platform");
            return Err(NametagError::UnsupportedPlatform);
        };

        if !transport.is_available() {
            warn!(kind = ?transport.kind(), "export transport unavailable");
            return Err(transport.unavailable_error());
        }

        tokio::fs::write(&self.csv_path, payload.csv_content.as_bytes()).await?;
        info!(bytes = payload.csv_content.len(), "CSV written");

        transport.send(&self.csv_path, payload).inspect_err(|e| {
            error!(kind = ?transport.kind(), error = %e, "export transport failed");
        })?;
        info!(kind = ?transport.kind(), "export handed to transport");
        Ok(transport.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingBridge;

    fn payload() -> ExportPayload {
        ExportPayload {
            subject: "New event: Jan 01".into(),
            body: "To: x@y.com\nSubject: New event: Jan 01\n\nAttendees:\nAlice".into(),
            csv_content: "\"New event: Jan 01\",\n,\"Alice\"".into(),
            recipient: "x@y.com".into(),
        }
    }

    #[tokio::test]
    async fn unsupported_platform_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendees.csv");
        let bridge = RecordingBridge::on(Platform::Other, true);
        let gateway = DispatchGateway::for_bridge(bridge, &path);

        let err = gateway.dispatch(&payload()).await.unwrap_err();
        assert!(matches!(err, NametagError::UnsupportedPlatform));
        assert!(!path.exists(), "no file may be written");
    }

    #[tokio::test]
    async fn ios_mails_csv_as_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendees.csv");
        let bridge = RecordingBridge::on(Platform::Ios, true);
        let gateway = DispatchGateway::for_bridge(bridge.clone(), &path);

        let kind = gateway.dispatch(&payload()).await.unwrap();
        assert_eq!(kind, TransportKind::MailCompose);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            payload().csv_content
        );

        let mails = bridge.mails.lock().unwrap();
        assert_eq!(mails.len(), 1);
        assert_eq!(mails[0].recipients, vec!["x@y.com"]);
        assert_eq!(mails[0].subject, "New event: Jan 01");
        assert_eq!(mails[0].body, payload().body);
        assert_eq!(mails[0].attachments, vec![path.clone()]);
        assert!(bridge.shares.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn android_shares_csv_with_fixed_mime_and_uti() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendees.csv");
        let bridge = RecordingBridge::on(Platform::Android, true);
        let gateway = DispatchGateway::for_bridge(bridge.clone(), &path);

        let kind = gateway.dispatch(&payload()).await.unwrap();
        assert_eq!(kind, TransportKind::ShareSheet);

        let shares = bridge.shares.lock().unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].path, path);
        assert_eq!(shares[0].mime_type, "text/csv");
        assert_eq!(shares[0].uti, "public.comma-separated-values-text");
        assert_eq!(shares[0].dialog_title, SHARE_DIALOG_TITLE);
        assert_eq!(shares[0].message, payload().body);
    }

    #[tokio::test]
    async fn unavailable_mail_does_not_fall_back_to_share() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendees.csv");
        let bridge = Arc::new(RecordingBridge {
            platform: Some(Platform::Ios),
            mail_available: false,
            share_available: true,
            ..Default::default()
        });
        let gateway = DispatchGateway::for_bridge(bridge.clone(), &path);

        let err = gateway.dispatch(&payload()).await.unwrap_err();
        assert!(matches!(err, NametagError::MailUnavailable));
        assert!(bridge.mails.lock().unwrap().is_empty());
        assert!(bridge.shares.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_share_reports_sharing_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = RecordingBridge::on(Platform::Android, false);
        let gateway = DispatchGateway::for_bridge(bridge, dir.path().join("attendees.csv"));

        let err = gateway.dispatch(&payload()).await.unwrap_err();
        assert!(matches!(err, NametagError::SharingUnavailable));
    }

    #[tokio::test]
    async fn every_export_overwrites_the_same_file() {
        struct Accepting;
        impl Transport for Accepting {
            fn kind(&self) -> TransportKind {
                TransportKind::ShareSheet
            }
            fn is_available(&self) -> bool {
                true
            }
            fn unavailable_error(&self) -> NametagError {
                NametagError::SharingUnavailable
            }
            fn send(&self, _csv_path: &Path, _payload: &ExportPayload) -> Result<()> {
                Ok(())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendees.csv");
        let gateway = DispatchGateway::new(Some(Box::new(Accepting)), &path);

        gateway.dispatch(&payload()).await.unwrap();
        let mut second = payload();
        second.csv_content = "\"Other\",".into();
        gateway.dispatch(&second).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\"Other\",");
    }

    #[tokio::test]
    async fn failed_send_leaves_csv_on_disk() {
        struct Failing;
        impl Transport for Failing {
            fn kind(&self) -> TransportKind {
                TransportKind::MailCompose
            }
            fn is_available(&self) -> bool {
                true
            }
            fn unavailable_error(&self) -> NametagError {
                NametagError::MailUnavailable
            }
            fn send(&self, _csv_path: &Path, _payload: &ExportPayload) -> Result<()> {
                Err(NametagError::Bridge("composer dismissed".into()))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendees.csv");
        let gateway = DispatchGateway::new(Some(Box::new(Failing)), &path);

        let err = gateway.dispatch(&payload()).await.unwrap_err();
        assert!(matches!(err, NametagError::Bridge(_)));
        assert!(path.exists());
    }
}
