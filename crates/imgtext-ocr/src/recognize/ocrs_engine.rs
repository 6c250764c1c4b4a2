// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pure-Rust OCR backend using the `ocrs` crate, with neural network models
// executed via `rten`. Only Latin script is recognised, so this engine accepts
// the `eng` language and nothing else.
//
// # Model Setup
//
// The engine needs two model files in one directory:
//
// - `text-detection.rten` — locates text regions in the image.
// - `text-recognition.rten` — decodes characters from detected regions.
//
// Running `ocrs-cli` once downloads them to the default cache directory,
// `$XDG_CACHE_HOME/ocrs` (typically `~/.cache/ocrs`).

use std::path::{Path, PathBuf};

use image::DynamicImage;
use imgtext_core::LanguageCode;
use imgtext_core::error::{ImgtextError, Result};
use ocrs::{ImageSource, OcrEngine as OcrsBackend, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Default directory for cached ocrs model files.
///
/// `$XDG_CACHE_HOME/ocrs`, falling back to `~/.cache/ocrs`.
pub fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// OCR engine backed by `ocrs`. Load once, reuse for many images.
pub struct OcrsEngine {
    engine: OcrsBackend,
}

impl OcrsEngine {
    /// Load models from `dir`, which must contain `text-detection.rten` and
    /// `text-recognition.rten`.
    ///
    /// # Errors
    ///
    /// Returns [`ImgtextError::EngineUnavailable`] if a model file is missing
    /// or cannot be loaded.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn from_model_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let detection_model = load_model(&dir.join(DETECTION_MODEL_FILENAME))?;
        let recognition_model = load_model(&dir.join(RECOGNITION_MODEL_FILENAME))?;

        let engine = OcrsBackend::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| {
            ImgtextError::EngineUnavailable(format!("failed to initialise ocrs: {}", err))
        })?;

        info!("ocrs engine initialised");
        Ok(Self { engine })
    }

    /// Load models from [`default_model_dir`].
    pub fn with_defaults() -> Result<Self> {
        Self::from_model_dir(default_model_dir())
    }
}

fn load_model(path: &Path) -> Result<Model> {
    if !path.exists() {
        return Err(ImgtextError::EngineUnavailable(format!(
            "ocrs model not found at {}; run `ocrs-cli` once to download models",
            path.display()
        )));
    }
    debug!(path = %path.display(), "Loading ocrs model");
    Model::load_file(path).map_err(|err| {
        ImgtextError::EngineUnavailable(format!(
            "failed to load ocrs model from {}: {}",
            path.display(),
            err
        ))
    })
}

/// Reject anything but Latin-script English.
fn ensure_supported(language: &LanguageCode) -> Result<()> {
    if language.components().all(|c| c == LanguageCode::ENGLISH) {
        Ok(())
    } else {
        Err(ImgtextError::InvalidLanguage(format!(
            "the ocrs engine only recognises `eng`, not `{language}`"
        )))
    }
}

impl super::TextRecognizer for OcrsEngine {
    fn name(&self) -> &str {
        "ocrs"
    }

    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &DynamicImage, language: &LanguageCode) -> Result<String> {
        ensure_supported(language)?;

        // ocrs wants RGB8.
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            ImgtextError::OcrError(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| ImgtextError::OcrError(format!("OCR preprocessing failed: {}", err)))?;

        let text = self.engine.get_text(&input).map_err(|err| {
            ImgtextError::OcrError(format!("OCR text recognition failed: {}", err))
        })?;

        debug!(line_count = text.lines().count(), "ocrs recognition complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_english_is_supported() {
        assert!(ensure_supported(&LanguageCode::english()).is_ok());
        assert!(ensure_supported(&LanguageCode::simplified_chinese()).is_err());
        assert!(ensure_supported(&LanguageCode::chinese_english()).is_err());
    }

    #[test]
    fn missing_models_are_reported() {
        let result = OcrsEngine::from_model_dir("/nonexistent/path/ocr-models");
        assert!(matches!(result, Err(ImgtextError::EngineUnavailable(_))));
    }

    #[test]
    fn default_model_dir_ends_in_ocrs() {
        assert!(default_model_dir().ends_with("ocrs") || default_model_dir().ends_with("ocrs-models"));
    }
}
