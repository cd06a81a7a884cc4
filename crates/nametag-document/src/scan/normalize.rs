// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR text normalization.

/// Collapse every run of whitespace (newlines included) into one space and
/// trim the ends.
///
/// An empty result means there is nothing to add.
pub fn normalize(raw_text: &str) -> String {
    raw_text.split_whitespace().collect::<Vec<_>>().join(" ")
}
