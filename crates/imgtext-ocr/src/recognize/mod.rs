// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR engines. Recognition itself is delegated to a third-party engine; this
// module only defines the seam the pipeline talks to.
//
// Tesseract is the default backend. The pure-Rust `ocrs` engine is available
// behind the `ocrs` feature gate:
//
// ```toml
// imgtext-ocr = { path = "crates/imgtext-ocr", features = ["ocrs"] }
// ```

use image::DynamicImage;
use imgtext_core::LanguageCode;
use imgtext_core::error::Result;

pub mod tesseract;

#[cfg(feature = "ocrs")]
pub mod ocrs_engine;

pub use tesseract::TesseractEngine;

#[cfg(feature = "ocrs")]
pub use ocrs_engine::OcrsEngine;

/// Something that turns a decoded image into raw, multi-line text.
///
/// Implementations return the engine output untouched (blank lines and all);
/// cleanup happens in [`crate::text`].
pub trait TextRecognizer {
    /// Short engine name for logs and console output.
    fn name(&self) -> &str;

    /// Recognise the text in `image` using the given language model(s).
    fn recognize(&self, image: &DynamicImage, language: &LanguageCode) -> Result<String>;
}

impl<R: TextRecognizer + ?Sized> TextRecognizer for &R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image: &DynamicImage, language: &LanguageCode) -> Result<String> {
        (**self).recognize(image, language)
    }
}

impl<R: TextRecognizer + ?Sized> TextRecognizer for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image: &DynamicImage, language: &LanguageCode) -> Result<String> {
        (**self).recognize(image, language)
    }
}
