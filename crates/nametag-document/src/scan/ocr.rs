// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Remote OCR client for the OCR.space parse endpoint.
//
// One multipart POST per call: `apikey`, `language`, `isOverlayRequired`,
// and the JPEG as `file` (`photo.jpg`, `image/jpeg`). There is no retry and
// no timeout here; a stalled service stalls that capture until the caller
// gives up on it.
//
// Response shape (only the parts we read):
//
// ```json
// {
//   "ParsedResults": [ { "ParsedText": "JANE DOE\r\n" } ],
//   "IsErroredOnProcessing": false,
//   "ErrorMessage": null
// }
// ```

use nametag_core::AppConfig;
use nametag_core::error::{NametagError, Result};
use nametag_core::types::{CapturedImage, OcrResult};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParseResponse {
    #[serde(default)]
    parsed_results: Option<Vec<ParsedResult>>,
    #[serde(default)]
    is_errored_on_processing: bool,
    /// A string or an array of strings, depending on the failure.
    #[serde(default)]
    error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: Option<String>,
}

/// Async client bound to a single OCR endpoint.
pub struct OcrClient {
    http: reqwest::Client,
    endpoint: String,
    language: String,
}

impl OcrClient {
    pub fn new(endpoint: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| NametagError::NetworkError(format!("HTTP client setup: {e}")))?;
        Ok(Self::with_http_client(http, endpoint, language))
    }

    /// Use a preconfigured `reqwest::Client` (proxy, TLS roots, ...).
    pub fn with_http_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.ocr_endpoint.clone(), config.ocr_language.clone())
    }

    /// Submit `image` for recognition.
    ///
    /// `Ok(OcrResult { raw_text: None })` means the service answered but read
    /// nothing; that is a normal outcome, not an error.
    #[instrument(skip_all, fields(endpoint = %self.endpoint, bytes = image.bytes.len()))]
    pub async fn recognize(&self, image: &CapturedImage, api_key: &str) -> Result<OcrResult> {
        let file = Part::bytes(image.bytes.clone())
            .file_name(CapturedImage::FILE_NAME)
            .mime_str(CapturedImage::MIME_TYPE)
            .map_err(|e| NametagError::NetworkError(format!("multipart: {e}")))?;

        let form = Form::new()
            .text("apikey", api_key.to_string())
            .text("language", self.language.clone())
            .text("isOverlayRequired", "false")
            .part("file", file);

        debug!("sending OCR request");
        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| NametagError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| NametagError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let detail = String::from_utf8_lossy(&body);
            warn!(%status, "OCR service rejected request");
            return Err(NametagError::ServiceError(format!(
                "HTTP {status}: {}",
                detail.trim()
            )));
        }

        let result = parse_response(&body)?;
        info!(found = result.raw_text.is_some(), "OCR response parsed");
        Ok(result)
    }
}

/// Extract the first result's text from a raw response body.
pub fn parse_response(body: &[u8]) -> Result<OcrResult> {
    let parsed: ParseResponse = serde_json::from_slice(body)
        .map_err(|e| NametagError::ServiceError(format!("malformed response: {e}")))?;

    if parsed.is_errored_on_processing {
        return Err(NametagError::ServiceError(describe_error(
            parsed.error_message.as_ref(),
        )));
    }

    let raw_text = parsed
        .parsed_results
        .and_then(|results| results.into_iter().next())
        .and_then(|first| first.parsed_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    Ok(OcrResult { raw_text })
}

fn describe_error(message: Option<&serde_json::Value>) -> String {
    match message {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        _ => "processing failed".to_string(),
    }
}
