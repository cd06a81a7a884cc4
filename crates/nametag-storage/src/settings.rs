// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed settings facade over a `KeyValueStore`.
//
// Storage failures never reach the caller: they are logged and the pipeline
// carries on with configured defaults or its in-memory state.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use nametag_core::AppConfig;
use nametag_core::error::Result;
use nametag_core::types::ScanSettings;
use tracing::{debug, info, warn};

use crate::kv::{KeyValueStore, MemoryStore, SqliteStore};

pub const KEY_EMAIL: &str = "nametag.email";
pub const KEY_OCR_API_KEY: &str = "nametag.ocr_api_key";
pub const KEY_SCANNED_NAMES: &str = "nametag.scanned_names";

/// Write-through store for `ScanSettings` and the scanned-name snapshot.
///
/// Shared between the session and the name list's debounce task, so the
/// backend sits behind a mutex. Every call holds the lock only for a single
/// key read or write.
pub struct SettingsStore {
    backend: Mutex<Box<dyn KeyValueStore>>,
}

impl SettingsStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Mutex::new(Box::new(backend)),
        }
    }

    /// Open the SQLite settings database at `path`, falling back to an
    /// in-memory store if it cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Self {
        match SqliteStore::open(path.as_ref()) {
            Ok(store) => {
                info!(path = %path.as_ref().display(), "settings database opened");
                Self::new(store)
            }
            Err(e) => {
                warn!(error = %e, "settings database unavailable, using in-memory fallback");
                Self::new(MemoryStore::new())
            }
        }
    }

    /// Read everything, substituting `config` defaults for missing keys.
    pub fn load(&self, config: &AppConfig) -> (ScanSettings, Vec<String>) {
        let email = self
            .read(KEY_EMAIL)
            .unwrap_or_else(|| config.default_email.clone());
        let ocr_api_key = self
            .read(KEY_OCR_API_KEY)
            .unwrap_or_else(|| config.default_ocr_api_key.clone());
        let names = self
            .read(KEY_SCANNED_NAMES)
            .map(|raw| decode_names(&raw))
            .unwrap_or_default();

        debug!(names = names.len(), "settings loaded");
        (ScanSettings { email, ocr_api_key }, names)
    }

    pub fn save_email(&self, email: &str) {
        self.write(KEY_EMAIL, email);
    }

    pub fn save_ocr_api_key(&self, key: &str) {
        self.write(KEY_OCR_API_KEY, key);
    }

    /// Persist the full name list as a JSON array.
    pub fn save_names(&self, names: &[String]) {
        match serde_json::to_string(names) {
            Ok(json) => self.write(KEY_SCANNED_NAMES, &json),
            Err(e) => warn!(error = %e, "failed to encode scanned names"),
        }
    }

    /// Remove all three keys.
    pub fn reset(&self) {
        let mut backend = self.lock();
        for key in [KEY_EMAIL, KEY_OCR_API_KEY, KEY_SCANNED_NAMES] {
            log_failure("remove", key, backend.remove(key));
        }
        info!("settings storage reset");
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.lock().get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "settings read failed, using default");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        log_failure("write", key, self.lock().set(key, value));
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn KeyValueStore>> {
        // A panic mid-write leaves nothing half-updated in the map itself.
        self.backend.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn log_failure(op: &str, key: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!(op, key, error = %e, "settings storage failed");
    }
}

/// Parse a persisted names snapshot. Blank entries are dropped so the list
/// invariant holds even for hand-edited or legacy data.
fn decode_names(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(names) => names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect(),
        Err(e) => {
            warn!(error = %e, "stored names are not a JSON string array, starting empty");
            Vec::new()
        }
    }
}
