// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// nametag-document — everything between the camera and the outgoing CSV.
//
// Provides image preparation (downscale + JPEG re-encode), the capture
// service on top of the native camera bridge, the remote OCR client, name
// normalization, and the attendee CSV export format.

pub mod export;
pub mod image;
pub mod scan;

// Re-export the primary items so callers can use `nametag_document::OcrClient` etc.
pub use export::csv::build_export;
pub use image::processor::ImageProcessor;
pub use scan::capture::CaptureService;
pub use scan::normalize::normalize;
pub use scan::ocr::OcrClient;
