// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction pipeline: load -> (preprocess) -> recognise -> clean -> write.
//
// Strictly sequential and blocking. Any failure aborts the run; nothing is
// retried and a half-written output file is not cleaned up.

use std::path::{Path, PathBuf};

use imgtext_core::LanguageCode;
use imgtext_core::error::{ImgtextError, Result};
use imgtext_core::human_errors::humanize_error;
use tracing::{error, info, instrument};

use crate::paths::derive_output_path;
use crate::raster::processor::ImageProcessor;
use crate::recognize::TextRecognizer;
use crate::text::{clean_text, preview};

/// Characters of extracted text shown in the console preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 300;

/// Rule printed above and below the preview.
const RULE: &str = "----------------------------------------";

/// One image to extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub language: LanguageCode,
    /// Grayscale + upscale small images before OCR.
    pub preprocess: bool,
}

impl ExtractRequest {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        language: LanguageCode,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            language,
            preprocess: false,
        }
    }

    /// Request whose output sits next to the input with a `.txt` extension.
    pub fn for_input(input: impl Into<PathBuf>, language: LanguageCode) -> Self {
        let input = input.into();
        let output = derive_output_path(&input);
        Self::new(input, output, language)
    }

    pub fn with_preprocessing(mut self, preprocess: bool) -> Self {
        self.preprocess = preprocess;
        self
    }
}

/// Pipeline stages, reported as they start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage<'a> {
    Preprocessing,
    Recognising(&'a LanguageCode),
    Writing(&'a Path),
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub input: PathBuf,
    pub output: PathBuf,
    pub language: LanguageCode,
    /// Cleaned text, exactly as written to `output`.
    pub text: String,
    pub line_count: usize,
}

impl Extraction {
    /// Console summary: paths plus a preview of the text.
    pub fn report(&self, preview_chars: usize) -> String {
        format!(
            "✅ Text extracted successfully!\n\
             📄 Input file: {}\n\
             💾 Output file: {}\n\
             📝 Preview:\n\
             {RULE}\n\
             {}\n\
             {RULE}",
            self.input.display(),
            self.output.display(),
            preview(&self.text, preview_chars),
        )
    }
}

/// Runs requests against one OCR engine.
pub struct Extractor<R> {
    recognizer: R,
}

impl<R: TextRecognizer> Extractor<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Run the whole pipeline for `request`.
    pub fn extract(&self, request: &ExtractRequest) -> Result<Extraction> {
        self.extract_with_progress(request, |_| {})
    }

    /// Like [`extract`](Self::extract), calling `on_stage` as each stage begins.
    #[instrument(skip_all, fields(
        input = %request.input.display(),
        language = %request.language,
        preprocess = request.preprocess,
        engine = self.recognizer.name(),
    ))]
    pub fn extract_with_progress<'r>(
        &self,
        request: &'r ExtractRequest,
        mut on_stage: impl FnMut(Stage<'r>),
    ) -> Result<Extraction> {
        if !request.input.exists() {
            return Err(ImgtextError::InputNotFound(request.input.clone()));
        }

        let mut processor = ImageProcessor::open(&request.input)?;
        if request.preprocess {
            on_stage(Stage::Preprocessing);
            processor = processor.prepare_for_ocr();
        }
        let image = processor.into_dynamic();

        on_stage(Stage::Recognising(&request.language));
        let raw = self.recognizer.recognize(&image, &request.language)?;

        let text = clean_text(&raw);
        let line_count = text.lines().count();

        on_stage(Stage::Writing(request.output.as_path()));
        std::fs::write(&request.output, &text)?;
        info!(
            output = %request.output.display(),
            line_count,
            "Extracted text written"
        );

        Ok(Extraction {
            input: request.input.clone(),
            output: request.output.clone(),
            language: request.language.clone(),
            text,
            line_count,
        })
    }
}

/// The console line printed for any error that ends a run.
pub fn failure_message(err: &ImgtextError) -> String {
    format!("❌ Extraction failed: {}", humanize_error(err))
}

/// Run one request, printing progress and the outcome to the console.
///
/// Errors never escape: they are logged, printed as a human-readable message
/// and reported as `None`.
pub fn run_extraction<R: TextRecognizer>(
    recognizer: R,
    request: &ExtractRequest,
    preview_chars: usize,
) -> Option<Extraction> {
    let extractor = Extractor::new(recognizer);
    let outcome = extractor.extract_with_progress(request, |stage| match stage {
        Stage::Preprocessing => println!("Preprocessing image..."),
        Stage::Recognising(language) => println!("Recognising {language} text..."),
        Stage::Writing(_) => {}
    });
    match outcome {
        Ok(extraction) => {
            println!("{}", extraction.report(preview_chars));
            Some(extraction)
        }
        Err(err) => {
            error!(error = %err, input = %request.input.display(), "Extraction failed");
            eprintln!("{}", failure_message(&err));
            None
        }
    }
}

/// Extract text from the unmodified image at `input` into `output`.
///
/// Returns the cleaned text, or `None` if anything went wrong.
pub fn extract_text_from_image<R: TextRecognizer>(
    recognizer: R,
    input: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
    language: LanguageCode,
) -> Option<String> {
    let request = ExtractRequest::new(input, output, language);
    run_extraction(recognizer, &request, DEFAULT_PREVIEW_CHARS).map(|e| e.text)
}

/// As [`extract_text_from_image`], but converts to grayscale and doubles the
/// size of images smaller than 300 pixels on either side before OCR.
pub fn extract_text_with_preprocessing<R: TextRecognizer>(
    recognizer: R,
    input: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
    language: LanguageCode,
) -> Option<String> {
    let request = ExtractRequest::new(input, output, language).with_preprocessing(true);
    run_extraction(recognizer, &request, DEFAULT_PREVIEW_CHARS).map(|e| e.text)
}
