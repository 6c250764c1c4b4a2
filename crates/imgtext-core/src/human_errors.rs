// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the console.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::ImgtextError;

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert an `ImgtextError` into a `HumanError`.
pub fn humanize_error(err: &ImgtextError) -> HumanError {
    match err {
        ImgtextError::InputNotFound(path) => HumanError {
            message: format!("Cannot find the file {}.", path.display()),
            suggestion: "Check the path for typos, or give the full path to the image.".into(),
        },

        ImgtextError::MissingInputPath => HumanError {
            message: "No image path was entered.".into(),
            suggestion: "Type or paste the path to an image, or pass it as an argument.".into(),
        },

        ImgtextError::ImageError(detail) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: format!(
                "The file may be damaged or not an image. Try saving it as PNG or JPEG first. ({detail})"
            ),
        },

        ImgtextError::OcrError(detail) => HumanError {
            message: "Text recognition didn't work on this image.".into(),
            suggestion: format!(
                "Try the preprocessing mode, or a sharper image with clearer text. ({detail})"
            ),
        },

        ImgtextError::InvalidLanguage(detail) => HumanError {
            message: "That language identifier isn't valid.".into(),
            suggestion: format!(
                "Use a code such as chi_sim, chi_tra, eng or chi_sim+eng. ({detail})"
            ),
        },

        ImgtextError::EngineUnavailable(detail) => HumanError {
            message: "The OCR engine isn't ready.".into(),
            suggestion: format!(
                "Install tesseract and the language packs you need, and make sure it is on PATH. ({detail})"
            ),
        },

        ImgtextError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "A file or folder couldn't be found.".into(),
                suggestion: format!("Check that the output folder exists. ({io_err})"),
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied.".into(),
                suggestion: format!(
                    "Choose a location you're allowed to write to. ({io_err})"
                ),
            },
            _ => HumanError {
                message: "Reading or writing a file failed.".into(),
                suggestion: format!("{io_err}"),
            },
        },

        ImgtextError::Serialization(detail) => HumanError {
            message: "A settings file is damaged.".into(),
            suggestion: format!("Fix or delete the config file. ({detail})"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_input_mentions_path() {
        let err = ImgtextError::InputNotFound(PathBuf::from("/tmp/nope.png"));
        let human = humanize_error(&err);
        assert!(human.message.contains("/tmp/nope.png"));
        assert!(human.suggestion.contains("full path"));
    }

    #[test]
    fn permission_denied_suggests_another_location() {
        let err = ImgtextError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        let human = humanize_error(&err);
        assert_eq!(human.message, "Permission denied.");
        assert!(human.suggestion.starts_with("Choose a location"));
    }

    #[test]
    fn ocr_errors_keep_detail() {
        let err = ImgtextError::OcrError("engine exited with status 1".into());
        let human = humanize_error(&err);
        assert!(human.suggestion.contains("status 1"));
    }

    #[test]
    fn missing_input_path_is_not_an_io_error() {
        let human = humanize_error(&ImgtextError::MissingInputPath);
        assert_eq!(human.message, "No image path was entered.");
        assert!(!human.to_string().contains("file I/O"));
        assert!(!human.message.contains("Reading or writing"));
    }
}
