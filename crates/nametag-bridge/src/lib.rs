// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Nametag — native platform bridge abstractions.
//!
//! The pipeline talks to the camera, the mail composer, and the share sheet
//! only through the traits in [`traits`]. Mobile shells implement
//! [`traits::PlatformBridge`] on top of their SDKs and hand it to the
//! session; desktop and CI builds use [`stub::StubBridge`].

use std::sync::Arc;

pub mod stub;
pub mod traits;

pub use traits::{MailRequest, PlatformBridge, ShareRequest};

/// The bridge compiled into this binary.
///
/// Only the stub ships in-tree; a mobile shell passes its own bridge to
/// `Session::open` instead of calling this.
pub fn platform_bridge() -> Arc<dyn PlatformBridge> {
    Arc::new(stub::StubBridge::new())
}
