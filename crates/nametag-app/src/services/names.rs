// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Name list manager: the canonical ordered list of attendee names.
//
// Two views of the list exist: the list itself and a free-text body
// (`names.join("\n")`) that the user can edit. The body is folded back into
// the list only through `replace_from_text`, which is a full replace; edits
// arriving keystroke by keystroke go through a debounced-apply state machine
// so a burst produces one replace and one persisted write.
//
// Every mutation persists the full snapshot before returning. Storage
// failures are logged by the store and the in-memory list stays
// authoritative.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use nametag_storage::SettingsStore;
use tokio::time::Instant;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Debounced apply
// ---------------------------------------------------------------------------

/// Lifecycle of a free-text edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// No edit has been submitted since the list was loaded.
    #[default]
    Idle,
    /// An edit is waiting for the quiet period to end.
    PendingApply { text: String, deadline: Instant },
    /// The latest edit has been applied.
    Applied,
}

/// What the driver should do after polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebouncePoll {
    /// Quiet period is over; apply this text now.
    Ready(String),
    /// Still inside the window; poll again at this instant.
    Wait(Instant),
    /// Nothing pending.
    Settled,
}

impl DebounceState {
    /// Record `text` as the latest edit. Any earlier pending edit is
    /// replaced and the window restarts.
    pub fn submit(&mut self, text: String, now: Instant, window: Duration) {
        *self = Self::PendingApply {
            text,
            deadline: now + window,
        };
    }

    pub fn poll(&mut self, now: Instant) -> DebouncePoll {
        let deadline = match self {
            Self::PendingApply { deadline, .. } => *deadline,
            Self::Idle | Self::Applied => return DebouncePoll::Settled,
        };
        if now < deadline {
            return DebouncePoll::Wait(deadline);
        }
        match self.take_pending() {
            Some(text) => DebouncePoll::Ready(text),
            None => DebouncePoll::Settled,
        }
    }

    /// Move straight to `Applied`, returning the pending text if any.
    pub fn take_pending(&mut self) -> Option<String> {
        match std::mem::replace(self, Self::Applied) {
            Self::PendingApply { text, .. } => Some(text),
            previous => {
                *self = previous;
                None
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingApply { .. })
    }
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

struct Inner {
    names: Vec<String>,
    debounce: DebounceState,
    driver_running: bool,
    /// Bumped for every spawned driver.
    driver_epoch: u64,
}

/// Clears `driver_running` if the driver task is dropped before it settles,
/// e.g. when its runtime shuts down mid-sleep.
struct DriverGuard {
    inner: Arc<Mutex<Inner>>,
    epoch: u64,
}

impl Drop for DriverGuard {
    fn drop(&mut self) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if inner.driver_epoch == self.epoch {
            inner.driver_running = false;
        }
    }
}

/// Owns the attendee list. Cheap to clone; clones share the same list.
#[derive(Clone)]
pub struct NameListManager {
    inner: Arc<Mutex<Inner>>,
    store: Arc<SettingsStore>,
    window: Duration,
}

impl NameListManager {
    /// Wrap an already-loaded list. Blank entries are dropped.
    pub fn new(names: Vec<String>, store: Arc<SettingsStore>, window: Duration) -> Self {
        let names = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self {
            inner: Arc::new(Mutex::new(Inner {
                names,
                debounce: DebounceState::Idle,
                driver_running: false,
                driver_epoch: 0,
            })),
            store,
            window,
        }
    }

    /// Trim `name` and append it. Blank input is ignored and not persisted.
    /// Returns whether the list changed.
    ///
    /// Line breaks inside `name` fold to a single space: an entry must stay
    /// one line of the body text.
    pub fn append(&self, name: &str) -> bool {
        let name = parse_names(name).join(" ");
        if name.is_empty() {
            warn!("no name entered to add");
            return false;
        }
        let mut inner = self.lock();
        inner.names.push(name);
        self.store.save_names(&inner.names);
        info!(count = inner.names.len(), "name added to list");
        true
    }

    /// Replace the whole list with the non-blank, trimmed lines of `text`.
    ///
    /// Cancels any pending debounced edit: this call is the newer one.
    pub fn replace_from_text(&self, text: &str) {
        let mut inner = self.lock();
        inner.debounce.take_pending();
        self.apply_locked(&mut inner, text);
    }

    /// Debounced variant of [`replace_from_text`] for keystroke-level edits.
    ///
    /// Calls arriving within the window of each other collapse into one
    /// replace carrying the last call's text. Without a Tokio runtime the
    /// edit is applied immediately.
    ///
    /// [`replace_from_text`]: Self::replace_from_text
    pub fn edit_text(&self, text: impl Into<String>) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, applying edit immediately");
            self.replace_from_text(&text.into());
            return;
        };

        let mut inner = self.lock();
        inner.debounce.submit(text.into(), Instant::now(), self.window);
        if inner.driver_running {
            return;
        }
        inner.driver_running = true;
        inner.driver_epoch += 1;
        let guard = DriverGuard {
            inner: Arc::clone(&self.inner),
            epoch: inner.driver_epoch,
        };
        drop(inner);

        let manager = self.clone();
        runtime.spawn(async move {
            let _guard = guard;
            manager.drive_debounce().await
        });
    }

    /// Apply a pending edit now instead of waiting out the window.
    pub fn flush(&self) {
        let mut inner = self.lock();
        if let Some(text) = inner.debounce.take_pending() {
            debug!("flushing pending edit");
            self.apply_locked(&mut inner, &text);
        }
    }

    /// Whether an edit is waiting for its window to close.
    pub fn has_pending_edit(&self) -> bool {
        self.lock().debounce.is_pending()
    }

    /// Empty the list and persist. Unconditional; confirmation is the
    /// caller's job.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.debounce.take_pending();
        inner.names.clear();
        self.store.save_names(&inner.names);
        info!("name list cleared");
    }

    /// Drop the in-memory list without writing, after the store itself was
    /// reset.
    pub(crate) fn discard(&self) {
        let mut inner = self.lock();
        inner.debounce.take_pending();
        inner.names.clear();
    }

    /// Read-only copy of the current list.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().names.clone()
    }

    /// The derived free-text view.
    pub fn body_text(&self) -> String {
        self.lock().names.join("\n")
    }

    pub fn len(&self) -> usize {
        self.lock().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn drive_debounce(self) {
        loop {
            let next = {
                let mut inner = self.lock();
                match inner.debounce.poll(Instant::now()) {
                    DebouncePoll::Ready(text) => {
                        self.apply_locked(&mut inner, &text);
                        inner.driver_running = false;
                        None
                    }
                    DebouncePoll::Wait(deadline) => Some(deadline),
                    DebouncePoll::Settled => {
                        inner.driver_running = false;
                        None
                    }
                }
            };
            match next {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => return,
            }
        }
    }

    fn apply_locked(&self, inner: &mut Inner, text: &str) {
        inner.names = parse_names(text);
        self.store.save_names(&inner.names);
        debug!(count = inner.names.len(), "name list replaced from text");
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Split on line breaks, trim each line, drop blanks.
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
