// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imgtext-ocr — Single-image text extraction.
//
// Loads an image, optionally preprocesses it (grayscale, upscaling of small
// images), hands it to an OCR engine, strips blank lines from the result and
// writes it next to the input as a `.txt` file.

pub mod paths;
pub mod pipeline;
pub mod raster;
pub mod recognize;
pub mod text;

pub use paths::{derive_output_path, resolve_input};
pub use pipeline::{
    ExtractRequest, Extraction, Extractor, extract_text_from_image,
    extract_text_with_preprocessing, failure_message,
};
pub use raster::processor::ImageProcessor;
pub use recognize::TextRecognizer;
pub use recognize::tesseract::TesseractEngine;
pub use text::{clean_lines, clean_text, preview};

#[cfg(feature = "ocrs")]
pub use recognize::ocrs_engine::OcrsEngine;
