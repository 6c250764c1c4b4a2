// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for imgtext.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ImgtextError;

/// Language identifier handed to the OCR engine.
///
/// Follows the Tesseract convention: one or more trained-data names joined by
/// `+`, for example `chi_sim` or `chi_sim+eng`. The value is validated on
/// construction so the engine never sees an empty or malformed model list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Simplified Chinese. The default.
    pub const SIMPLIFIED_CHINESE: &'static str = "chi_sim";
    /// Traditional Chinese.
    pub const TRADITIONAL_CHINESE: &'static str = "chi_tra";
    /// English (Latin script).
    pub const ENGLISH: &'static str = "eng";
    /// Mixed simplified Chinese and English.
    pub const CHINESE_ENGLISH: &'static str = "chi_sim+eng";

    /// Parse and validate a language identifier.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ImgtextError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(ImgtextError::InvalidLanguage(
                "language identifier is empty".into(),
            ));
        }
        for component in code.split('+') {
            if component.is_empty() {
                return Err(ImgtextError::InvalidLanguage(format!(
                    "`{code}` contains an empty component"
                )));
            }
            if !component
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(ImgtextError::InvalidLanguage(format!(
                    "`{component}` is not a valid language model name"
                )));
            }
        }
        Ok(Self(code.to_string()))
    }

    pub fn simplified_chinese() -> Self {
        Self(Self::SIMPLIFIED_CHINESE.into())
    }

    pub fn traditional_chinese() -> Self {
        Self(Self::TRADITIONAL_CHINESE.into())
    }

    pub fn english() -> Self {
        Self(Self::ENGLISH.into())
    }

    pub fn chinese_english() -> Self {
        Self(Self::CHINESE_ENGLISH.into())
    }

    /// The raw identifier, as passed to the engine.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the individual language models (`chi_sim+eng` yields two).
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('+')
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::simplified_chinese()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = ImgtextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for LanguageCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LanguageCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_simplified_chinese() {
        assert_eq!(LanguageCode::default().as_str(), "chi_sim");
    }

    #[test]
    fn parses_mixed_mode() {
        let lang: LanguageCode = "chi_sim+eng".parse().unwrap();
        assert_eq!(lang, LanguageCode::chinese_english());
        assert_eq!(lang.components().collect::<Vec<_>>(), vec!["chi_sim", "eng"]);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let lang = LanguageCode::new("  eng \n").unwrap();
        assert_eq!(lang.as_str(), "eng");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for bad in ["", "   ", "eng+", "+eng", "chi sim", "eng;rm", "chi_sim++eng"] {
            assert!(
                LanguageCode::new(bad).is_err(),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let json = serde_json::to_string(&LanguageCode::traditional_chinese()).unwrap();
        assert_eq!(json, "\"chi_tra\"");
        let back: LanguageCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "chi_tra");
    }

    #[test]
    fn deserialisation_validates() {
        let result: Result<LanguageCode, _> = serde_json::from_str("\"bad code\"");
        assert!(result.is_err());
    }
}
