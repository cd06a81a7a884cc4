// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer. Ties the backend crates into one session a front end can
// drive: scan, curate the list, export.

pub mod data_dir;
pub mod dispatch;
pub mod names;
pub mod pipeline;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
