// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tesseract backend.
//
// Drives the system `tesseract` binary through `rusty-tesseract`. The decoded
// image is written to a temporary PNG and handed over by path, so the engine
// sees exactly the pixels produced by preprocessing.
//
// # Installation
//
// Tesseract and the trained data for every language you use must be
// installed on the host, e.g. on Debian/Ubuntu:
//
// ```sh
// apt install tesseract-ocr tesseract-ocr-chi-sim tesseract-ocr-chi-tra
// ```

use std::borrow::Cow;
use std::io::Write;

use image::{ColorType, DynamicImage, ImageFormat};
use imgtext_core::error::{ImgtextError, Result};
use imgtext_core::{LanguageCode, TesseractSettings};
use rusty_tesseract::{Args, Image};
use tracing::{debug, info, instrument, warn};

/// OCR engine backed by the Tesseract command-line tool.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    settings: TesseractSettings,
}

impl TesseractEngine {
    /// Create an engine with explicit dpi/psm/oem settings.
    pub fn new(settings: TesseractSettings) -> Self {
        Self { settings }
    }

    /// Create an engine that leaves every option at the Tesseract default.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Version string reported by the installed `tesseract`.
    ///
    /// # Errors
    ///
    /// Returns [`ImgtextError::EngineUnavailable`] if the binary cannot be run.
    pub fn version() -> Result<String> {
        rusty_tesseract::get_tesseract_version().map_err(|err| {
            ImgtextError::EngineUnavailable(format!("cannot run tesseract: {err:?}"))
        })
    }

    /// Trained-data languages installed for the local `tesseract`.
    pub fn available_languages() -> Result<Vec<String>> {
        rusty_tesseract::get_tesseract_langs().map_err(|err| {
            ImgtextError::EngineUnavailable(format!("cannot list tesseract languages: {err:?}"))
        })
    }

    /// Fail early if any component of `language` is not installed.
    #[instrument(skip_all, fields(language = %language))]
    pub fn check_language(language: &LanguageCode) -> Result<()> {
        let installed = Self::available_languages()?;
        let missing: Vec<&str> = language
            .components()
            .filter(|component| !installed.iter().any(|lang| lang == component))
            .collect();
        if missing.is_empty() {
            debug!("All language models installed");
            Ok(())
        } else {
            warn!(?missing, "Language models not installed");
            Err(ImgtextError::EngineUnavailable(format!(
                "language model(s) not installed: {}",
                missing.join(", ")
            )))
        }
    }

    fn args(&self, language: &LanguageCode) -> Args {
        Args {
            lang: language.as_str().to_string(),
            dpi: self.settings.dpi,
            psm: self.settings.psm,
            oem: self.settings.oem,
            ..Args::default()
        }
    }
}

impl super::TextRecognizer for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    #[instrument(skip_all, fields(width = image.width(), height = image.height(), language = %language))]
    fn recognize(&self, image: &DynamicImage, language: &LanguageCode) -> Result<String> {
        info!("Starting Tesseract text recognition");

        let png = encode_png(image)?;
        let mut scratch = tempfile::Builder::new()
            .prefix("imgtext-")
            .suffix(".png")
            .tempfile()?;
        scratch.write_all(&png)?;
        scratch.flush()?;

        let input = Image::from_path(scratch.path().to_path_buf()).map_err(|err| {
            ImgtextError::OcrError(format!("tesseract rejected the input image: {err:?}"))
        })?;

        let text = rusty_tesseract::image_to_string(&input, &self.args(language))
            .map_err(|err| ImgtextError::OcrError(format!("tesseract failed: {err:?}")))?;

        debug!(
            line_count = text.lines().count(),
            char_count = text.chars().count(),
            "Tesseract recognition complete"
        );
        Ok(text)
    }
}

/// Encode an image as PNG bytes. Floating-point images are narrowed to RGBA8
/// first since the PNG encoder has no float formats.
fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let image: Cow<'_, DynamicImage> = match image.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        _ => Cow::Borrowed(image),
    };
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, ImageFormat::Png).map_err(|err| {
        ImgtextError::ImageError(format!("PNG encoding failed: {}", err))
    })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognize::TextRecognizer;
    use image::{GrayImage, Luma, Rgb32FImage};

    #[test]
    fn args_carry_language_and_settings() {
        let engine = TesseractEngine::new(TesseractSettings {
            dpi: Some(300),
            psm: Some(6),
            oem: None,
        });
        let args = engine.args(&LanguageCode::chinese_english());
        assert_eq!(args.lang, "chi_sim+eng");
        assert_eq!(args.dpi, Some(300));
        assert_eq!(args.psm, Some(6));
        assert_eq!(args.oem, None);
    }

    #[test]
    fn default_settings_pass_no_flags() {
        let args = TesseractEngine::with_defaults().args(&LanguageCode::default());
        assert_eq!(args.lang, "chi_sim");
        assert_eq!((args.dpi, args.psm, args.oem), (None, None, None));
    }

    #[test]
    fn encode_png_produces_decodable_bytes() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(9, 4, Luma([17])));
        let bytes = encode_png(&img).unwrap();
        let back = image::load_from_memory(&bytes).unwrap();
        assert_eq!((back.width(), back.height()), (9, 4));
        assert_eq!(back.color().channel_count(), 1);
    }

    #[test]
    fn encode_png_narrows_float_images() {
        let img = DynamicImage::ImageRgb32F(Rgb32FImage::new(3, 3));
        assert!(encode_png(&img).is_ok());
    }

    #[test]
    #[ignore = "needs an installed tesseract with eng"]
    fn recognizes_through_temp_png_handoff() {
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(200, 80, Luma([255])));
        let text = TesseractEngine::with_defaults()
            .recognize(&blank, &LanguageCode::english())
            .unwrap();
        assert!(text.trim().is_empty());
    }
}
