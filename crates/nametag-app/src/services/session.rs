// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session: the process-wide state, constructed once and passed by reference.
//
// `open` loads persisted settings and names (after an optional reset);
// `reset` wipes storage and returns everything to configured defaults.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use nametag_bridge::PlatformBridge;
use nametag_core::AppConfig;
use nametag_core::error::Result;
use nametag_core::human_errors::{Notification, classify_error, humanize_error};
use nametag_core::types::ScanSettings;
use nametag_document::build_export;
use nametag_document::export::csv::export_subject;
use nametag_storage::SettingsStore;
use tracing::{info, instrument, warn};

use super::dispatch::{DispatchGateway, TransportKind};
use super::names::NameListManager;
use super::pipeline::{ScanOutcome, ScanPipeline};

pub struct Session {
    config: AppConfig,
    store: Arc<SettingsStore>,
    settings: ScanSettings,
    names: NameListManager,
    pipeline: ScanPipeline,
    gateway: DispatchGateway,
}

impl Session {
    /// Build the session. The CSV is exported to
    /// `export_dir/<config.export_file_name>`.
    #[instrument(skip_all, fields(export_dir = %export_dir.display()))]
    pub fn open(
        config: AppConfig,
        store: Arc<SettingsStore>,
        bridge: Arc<dyn PlatformBridge>,
        export_dir: &Path,
    ) -> Result<Self> {
        if config.reset_storage_on_start {
            info!("resetting stored settings on start");
            store.reset();
        }
        let (settings, names) = store.load(&config);
        info!(
            platform = bridge.platform_name(),
            names = names.len(),
            "session opened"
        );

        let pipeline = ScanPipeline::from_config(bridge.clone(), &config)?;
        let gateway =
            DispatchGateway::for_bridge(bridge, export_dir.join(&config.export_file_name));
        let names = NameListManager::new(names, store.clone(), config.text_debounce());

        Ok(Self {
            config,
            store,
            settings,
            names,
            pipeline,
            gateway,
        })
    }

    /// Swap in a different scan pipeline (custom HTTP client, test server).
    pub fn with_pipeline(mut self, pipeline: ScanPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.settings.email = email.into();
        self.store.save_email(&self.settings.email);
    }

    pub fn set_ocr_api_key(&mut self, key: impl Into<String>) {
        self.settings.ocr_api_key = key.into();
        self.store.save_ocr_api_key(&self.settings.ocr_api_key);
    }

    pub fn names(&self) -> &NameListManager {
        &self.names
    }

    /// Capture a badge and read a candidate name off it.
    pub async fn scan(&self) -> ScanOutcome {
        self.pipeline.scan(&self.settings).await
    }

    /// Add a name the user accepted. Returns false for blank input.
    pub fn confirm_candidate(&self, name: &str) -> bool {
        self.names.append(name)
    }

    /// Feed a keystroke-level edit of the list body.
    pub fn edit_body(&self, text: impl Into<String>) {
        self.names.edit_text(text);
    }

    /// Empty the list. The caller is responsible for asking first.
    pub fn clear_names(&self) {
        self.names.clear();
    }

    /// Export the current list, dated `today`.
    #[instrument(skip(self))]
    pub async fn export(&self, today: NaiveDate) -> Notification {
        self.names.flush();
        let names = self.names.snapshot();
        let subject = export_subject(today);
        let payload = build_export(&subject, &names, &self.settings.email);

        match self.gateway.dispatch(&payload).await {
            Ok(TransportKind::MailCompose) => {
                Notification::info(format!("Mail drafted with {} attendees.", names.len()))
            }
            Ok(TransportKind::ShareSheet) => {
                Notification::info(format!("Shared {} attendees.", names.len()))
            }
            Err(e) => {
                warn!(error = %e, class = ?classify_error(&e), "export failed");
                humanize_error(&e)
            }
        }
    }

    /// [`Session::export`] with the local calendar date.
    pub async fn export_now(&self) -> Notification {
        self.export(chrono::Local::now().date_naive()).await
    }

    /// Wipe storage and return to configured defaults.
    pub fn reset(&mut self) {
        self.store.reset();
        self.settings = ScanSettings {
            email: self.config.default_email.clone(),
            ocr_api_key: self.config.default_ocr_api_key.clone(),
        };
        self.names.discard();
        info!("session reset");
    }

    /// Path the CSV is written to on export.
    pub fn export_path(&self) -> &Path {
        self.gateway.csv_path()
    }
}
