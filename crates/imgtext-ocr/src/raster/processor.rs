// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decoding from disk plus the fixed OCR preprocessing steps
// (grayscale conversion, upscaling of small images). Operates on in-memory
// images using the `image` crate.

use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;
use imgtext_core::error::ImgtextError;
use tracing::{debug, info, instrument};

/// Images narrower or shorter than this (in pixels) are upscaled before OCR.
pub const UPSCALE_THRESHOLD: u32 = 300;

/// Scale factor applied to both dimensions of a small image.
pub const UPSCALE_FACTOR: u32 = 2;

/// A single decoded image on its way to the OCR engine.
///
/// Transformations consume `self` and return a new `ImageProcessor`, so the
/// preprocessing steps chain:
///
/// ```ignore
/// let image = ImageProcessor::open("receipt.png")?
///     .grayscale()
///     .upscale_if_small()
///     .into_dynamic();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// The path is checked for existence first so a missing file is reported
    /// as [`ImgtextError::InputNotFound`] rather than a decoder error. Any
    /// format the `image` crate can decode is accepted.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImgtextError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImgtextError::InputNotFound(path.to_path_buf()));
        }
        let img = image::open(path).map_err(|err| {
            ImgtextError::ImageError(format!("failed to open {}: {}", path.display(), err))
        })?;
        info!(
            width = img.width(),
            height = img.height(),
            channels = img.color().channel_count(),
            "Image loaded"
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

    /// Number of colour channels in the current pixel format.
    pub fn channel_count(&self) -> u8 {
        self.image.color().channel_count()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Convert the image to single-channel 8-bit luma.
    ///
    /// Alpha is discarded: `DynamicImage::grayscale` would keep it for RGBA
    /// input, which leaves two channels.
    #[instrument(skip(self))]
    pub fn grayscale(self) -> Self {
        info!(from_channels = self.channel_count(), "Converting to grayscale");
        Self {
            image: DynamicImage::ImageLuma8(self.image.to_luma8()),
        }
    }

    /// Whether either dimension is below [`UPSCALE_THRESHOLD`].
    pub fn is_small(&self) -> bool {
        self.width() < UPSCALE_THRESHOLD || self.height() < UPSCALE_THRESHOLD
    }

    /// Double both dimensions with Lanczos3 if the image is small, otherwise
    /// return it untouched.
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn upscale_if_small(self) -> Self {
        if !self.is_small() {
            debug!("Image large enough, no upscaling");
            return self;
        }
        let new_w = self.width().saturating_mul(UPSCALE_FACTOR);
        let new_h = self.height().saturating_mul(UPSCALE_FACTOR);
        info!(new_w, new_h, "Upscaling small image");
        self.resize_exact(new_w, new_h)
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        let resized = self.image.resize_exact(width, height, FilterType::Lanczos3);
        Self { image: resized }
    }

    /// The fixed preprocessing applied before OCR: grayscale, then upscale
    /// if small.
    pub fn prepare_for_ocr(self) -> Self {
        self.grayscale().upscale_if_small()
    }
}
