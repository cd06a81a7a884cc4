// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// nametag-storage — persisted settings for the Nametag badge scanner.
//
// A small key-value layer (SQLite on disk, or in memory) under a typed
// facade that knows the three keys the app cares about: recipient email,
// OCR API key, and the ordered list of scanned names.

pub mod kv;
pub mod settings;

pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
pub use settings::SettingsStore;
