// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — camera capture, remote OCR, and normalization of the
// recognised text into a candidate name.

pub mod capture;
pub mod normalize;
pub mod ocr;

pub use capture::CaptureService;
pub use normalize::normalize;
pub use ocr::OcrClient;
