// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`AppConfig::default_email`].
pub const ENV_EMAIL: &str = "NAMETAG_EMAIL";
/// Environment variable overriding [`AppConfig::default_ocr_api_key`].
pub const ENV_OCR_API_KEY: &str = "NAMETAG_OCR_API_KEY";
/// Environment variable enabling [`AppConfig::reset_storage_on_start`].
pub const ENV_RESET_STORAGE_ON_START: &str = "NAMETAG_RESET_STORAGE_ON_START";
/// Environment variable overriding [`AppConfig::ocr_endpoint`].
pub const ENV_OCR_ENDPOINT: &str = "NAMETAG_OCR_ENDPOINT";

/// Build-time and launch-time settings. User-editable values
/// (`ScanSettings`) start from the defaults held here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Destination email used when nothing has been stored yet.
    pub default_email: String,
    /// OCR API key used when nothing has been stored yet.
    pub default_ocr_api_key: String,
    /// Wipe all persisted settings before loading them.
    pub reset_storage_on_start: bool,
    /// Remote OCR parse endpoint.
    pub ocr_endpoint: String,
    /// Language hint sent with every OCR request.
    pub ocr_language: String,
    /// Captured photos are scaled down to this width (never up).
    pub capture_target_width: u32,
    /// JPEG quality (1-100) for the upload artifact.
    pub jpeg_quality: u8,
    /// Quiet period before an edited list body is applied.
    pub text_debounce_ms: u64,
    /// File name of the exported CSV.
    pub export_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_email: String::new(),
            default_ocr_api_key: String::new(),
            reset_storage_on_start: false,
            ocr_endpoint: "https://api.ocr.space/parse/image".into(),
            ocr_language: "eng".into(),
            capture_target_width: 640,
            jpeg_quality: 50,
            text_debounce_ms: 300,
            export_file_name: "attendees.csv".into(),
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with the `NAMETAG_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reads through `lookup`, so callers
    /// can feed values from somewhere other than the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(email) = lookup(ENV_EMAIL) {
            config.default_email = email;
        }
        if let Some(key) = lookup(ENV_OCR_API_KEY) {
            config.default_ocr_api_key = key;
        }
        if let Some(flag) = lookup(ENV_RESET_STORAGE_ON_START) {
            config.reset_storage_on_start = flag.trim() == "true";
        }
        if let Some(endpoint) = lookup(ENV_OCR_ENDPOINT) {
            if !endpoint.trim().is_empty() {
                config.ocr_endpoint = endpoint;
            }
        }
        config
    }

    pub fn text_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.text_debounce_ms)
    }
}
