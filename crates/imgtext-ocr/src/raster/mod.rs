// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — image loading and OCR preprocessing (grayscale, upscaling).

pub mod processor;

pub use processor::{ImageProcessor, UPSCALE_FACTOR, UPSCALE_THRESHOLD};
