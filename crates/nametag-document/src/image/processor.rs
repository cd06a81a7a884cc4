// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode a camera frame, shrink it to the upload width,
// and re-encode it as JPEG. Operates on in-memory images using the `image`
// crate.

use image::DynamicImage;
use image::imageops::FilterType;
use nametag_core::error::NametagError;
use tracing::{debug, info, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, enabling
/// method chaining.
///
/// ```ignore
/// let jpeg = ImageProcessor::from_bytes(&frame)?
///     .downscale_to_width(640)
///     .to_jpeg_bytes(50)?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, NametagError> {
        let img = image::load_from_memory(data).map_err(|err| {
            NametagError::EncodingError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Transformations ------------------------------------------------------

    /// Scale the image down to `target_width`, preserving aspect ratio.
    ///
    /// Images already at or below the target width are returned untouched;
    /// this never upscales.
    #[instrument(skip(self))]
    pub fn downscale_to_width(self, target_width: u32) -> Self {
        let (width, height) = (self.image.width(), self.image.height());
        if target_width == 0 || width <= target_width {
            debug!(width, target_width, "No downscale needed");
            return self;
        }

        let scaled_height =
            ((u64::from(height) * u64::from(target_width)) as f64 / f64::from(width)).round();
        let scaled_height = (scaled_height as u32).max(1);

        info!(
            from_w = width,
            from_h = height,
            to_w = target_width,
            to_h = scaled_height,
            "Downscaling image"
        );
        let resized = self
            .image
            .resize_exact(target_width, scaled_height, FilterType::Triangle);
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, NametagError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        rgb.write_with_encoder(encoder).map_err(|err| {
            NametagError::EncodingError(format!("JPEG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }
}
