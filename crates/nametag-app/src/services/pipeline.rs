// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan pipeline: camera → resize/encode → OCR → normalize.
//
// Each stage is a suspension point. Failures never escape as errors; they
// come back as a `ScanOutcome::Failed` carrying the notification to show.

use std::sync::Arc;

use nametag_bridge::PlatformBridge;
use nametag_core::AppConfig;
use nametag_core::error::Result;
use nametag_core::human_errors::{Notification, classify_error, humanize_error};
use nametag_core::types::ScanSettings;
use nametag_document::{CaptureService, OcrClient, normalize};
use tracing::{info, instrument, warn};

/// What a single press of "Snap Badge" produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A normalized name waiting for the user to confirm it.
    Candidate(String),
    /// The service answered but read nothing usable.
    NothingFound,
    Failed(Notification),
}

impl ScanOutcome {
    /// The notification to show, if any. Candidates need none.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Candidate(_) => None,
            Self::NothingFound => Some(Notification::no_text_found()),
            Self::Failed(n) => Some(n.clone()),
        }
    }
}

pub struct ScanPipeline {
    capture: CaptureService,
    ocr: OcrClient,
}

impl ScanPipeline {
    pub fn new(capture: CaptureService, ocr: OcrClient) -> Self {
        Self { capture, ocr }
    }

    pub fn from_config(bridge: Arc<dyn PlatformBridge>, config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            CaptureService::from_config(bridge, config),
            OcrClient::from_config(config)?,
        ))
    }

    /// Run one capture attempt. Nothing is retried.
    #[instrument(skip_all)]
    pub async fn scan(&self, settings: &ScanSettings) -> ScanOutcome {
        let image = match self.capture.capture().await {
            Ok(image) => image,
            Err(e) => {
                warn!(error = %e, class = ?classify_error(&e), "capture failed");
                return ScanOutcome::Failed(humanize_error(&e));
            }
        };

        let result = match self.ocr.recognize(&image, &settings.ocr_api_key).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, class = ?classify_error(&e), "OCR failed");
                return ScanOutcome::Failed(humanize_error(&e));
            }
        };

        let candidate = result.raw_text.as_deref().map(normalize).unwrap_or_default();
        if candidate.is_empty() {
            info!("no text found");
            return ScanOutcome::NothingFound;
        }
        info!(chars = candidate.chars().count(), "candidate name recognised");
        ScanOutcome::Candidate(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use nametag_bridge::stub::StubBridge;
    use nametag_core::human_errors::Severity;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn settings() -> ScanSettings {
        ScanSettings {
            email: "desk@example.org".into(),
            ocr_api_key: "k-123".into(),
        }
    }

    fn write_badge_photo(dir: &std::path::Path) -> std::path::PathBuf {
        let img = image::RgbImage::from_pixel(800, 400, image::Rgb([240, 240, 240]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let path = dir.join("badge.png");
        std::fs::write(&path, png).unwrap();
        path
    }

    /// Answer one OCR request with `body`.
    async fn ocr_server(body: &'static str) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/parse/image", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut seen = Vec::new();
            let mut chunk = [0u8; 8192];
            // Closing multipart boundary, or the last chunk if chunked.
            while !(seen.ends_with(b"--\r\n") || seen.ends_with(b"0\r\n\r\n")) {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                seen.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        (url, handle)
    }

    fn pipeline(bridge: StubBridge, url: &str) -> ScanPipeline {
        let http = reqwest_client();
        ScanPipeline::new(
            CaptureService::new(Arc::new(bridge), 640, 50),
            OcrClient::with_http_client(http, url, "eng"),
        )
    }

    fn reqwest_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn recognised_text_becomes_normalized_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_badge_photo(dir.path());
        let (url, server) = ocr_server(
            r#"{"ParsedResults":[{"ParsedText":"  ADA \r\n LOVELACE \n"}],"IsErroredOnProcessing":false}"#,
        )
        .await;

        let outcome = pipeline(StubBridge::with_still_image(photo), &url)
            .scan(&settings())
            .await;
        server.await.unwrap();

        assert_eq!(outcome, ScanOutcome::Candidate("ADA LOVELACE".into()));
        assert!(outcome.notification().is_none());
    }

    #[tokio::test]
    async fn blank_text_is_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_badge_photo(dir.path());
        let (url, server) = ocr_server(
            r#"{"ParsedResults":[{"ParsedText":" \r\n "}],"IsErroredOnProcessing":false}"#,
        )
        .await;

        let outcome = pipeline(StubBridge::with_still_image(photo), &url)
            .scan(&settings())
            .await;
        server.await.unwrap();

        assert_eq!(outcome, ScanOutcome::NothingFound);
        assert_eq!(
            outcome.notification().map(|n| n.severity),
            Some(Severity::Warning)
        );
    }

    #[tokio::test]
    async fn service_error_is_a_warning_not_a_crash() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_badge_photo(dir.path());
        let (url, server) = ocr_server(
            r#"{"IsErroredOnProcessing":true,"ErrorMessage":["Invalid API key"]}"#,
        )
        .await;

        let outcome = pipeline(StubBridge::with_still_image(photo), &url)
            .scan(&settings())
            .await;
        server.await.unwrap();

        match outcome {
            ScanOutcome::Failed(n) => assert_eq!(n.severity, Severity::Warning),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn camera_without_permission_fails_before_any_request() {
        // Nothing listens here; reaching the network would be a different error.
        let outcome = pipeline(StubBridge::new(), "http://127.0.0.1:9/parse/image")
            .scan(&settings())
            .await;

        let expected = humanize_error(&nametag_core::NametagError::PermissionDenied);
        assert_eq!(outcome, ScanOutcome::Failed(expected));
    }

    #[tokio::test]
    async fn undecodable_photo_aborts_the_capture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("badge.png");
        std::fs::write(&path, b"not an image").unwrap();

        let outcome = pipeline(
            StubBridge::with_still_image(path),
            "http://127.0.0.1:9/parse/image",
        )
        .scan(&settings())
        .await;

        match outcome {
            ScanOutcome::Failed(n) => assert_eq!(n.severity, Severity::Error),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
