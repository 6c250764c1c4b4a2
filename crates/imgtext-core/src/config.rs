// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::LanguageCode;

const CONFIG_DIR: &str = "imgtext";
const CONFIG_FILE: &str = "config.json";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Language used when none is given on the command line.
    pub default_language: LanguageCode,
    /// Run grayscale conversion and small-image upscaling before OCR.
    pub preprocess: bool,
    /// Number of characters shown in the console preview after extraction.
    pub preview_chars: usize,
    /// Extra knobs passed through to Tesseract.
    pub tesseract: TesseractSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::default(),
            preprocess: false,
            preview_chars: 300,
            tesseract: TesseractSettings::default(),
        }
    }
}

/// Tesseract command-line options. `None` keeps the engine default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractSettings {
    /// Input resolution hint (`--dpi`).
    pub dpi: Option<i32>,
    /// Page segmentation mode (`--psm`).
    pub psm: Option<i32>,
    /// OCR engine mode (`--oem`).
    pub oem: Option<i32>,
}

impl AppConfig {
    /// Read a config file. Fails if the file is missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Read a config file, falling back to defaults.
    ///
    /// A missing file is the normal case and is not reported; a file that
    /// exists but cannot be read or parsed is logged and ignored.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                debug!(path = %path.display(), "Config loaded");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Ignoring unreadable config file");
                Self::default()
            }
        }
    }

    /// Write the config as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Default config file location.
///
/// `$XDG_CONFIG_HOME/imgtext/config.json`, then `~/.config/imgtext/config.json`,
/// then `imgtext.json` in the current directory.
pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join(CONFIG_DIR).join(CONFIG_FILE)
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    } else {
        PathBuf::from("imgtext.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.default_language.as_str(), "chi_sim");
        assert!(!config.preprocess);
        assert_eq!(config.preview_chars, 300);
        assert_eq!(config.tesseract, TesseractSettings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "default_language": "eng", "tesseract": { "psm": 6 } }"#)
                .unwrap();
        assert_eq!(config.default_language.as_str(), "eng");
        assert_eq!(config.preview_chars, 300);
        assert_eq!(config.tesseract.psm, Some(6));
        assert_eq!(config.tesseract.dpi, None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            default_language: LanguageCode::chinese_english(),
            preprocess: true,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn load_or_default_tolerates_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(AppConfig::load_or_default(&missing), AppConfig::default());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(AppConfig::load(&broken).is_err());
        assert_eq!(AppConfig::load_or_default(&broken), AppConfig::default());
    }

    #[test]
    fn default_path_ends_with_config_file() {
        let path = default_config_path();
        assert!(path.to_string_lossy().ends_with("json"));
    }
}
