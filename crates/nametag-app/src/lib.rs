// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Nametag — scan conference name badges, curate the attendee list, and send
// it on as CSV.
//
// Front ends (the `nametag` CLI here, or a mobile shell with its own
// `PlatformBridge`) open a `Session` and call into it.

pub mod services;

pub use services::dispatch::{DispatchGateway, Transport, TransportKind};
pub use services::names::{DebounceState, NameListManager, parse_names};
pub use services::pipeline::{ScanOutcome, ScanPipeline};
pub use services::session::Session;
