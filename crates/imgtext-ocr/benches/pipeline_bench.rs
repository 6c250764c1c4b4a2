// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the CPU-side stages of the imgtext-ocr pipeline:
// OCR preprocessing and text cleanup. Recognition itself runs in the external
// engine and is not measured here.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use imgtext_ocr::{ImageProcessor, clean_text};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Preprocess a 200x120 RGB image: grayscale plus the 2x Lanczos upscale,
/// which is the expensive path since both sides are under the threshold.
fn bench_prepare_for_ocr(c: &mut Criterion) {
    let mut img = RgbImage::from_pixel(200, 120, Rgb([245, 245, 245]));
    for y in 40..80 {
        for x in 20..180 {
            img.put_pixel(x, y, Rgb([20, 20, 20]));
        }
    }
    let dynamic = DynamicImage::ImageRgb8(img);

    c.bench_function("prepare_for_ocr (200x120)", |b| {
        b.iter(|| {
            let processor = ImageProcessor::from_dynamic(black_box(dynamic.clone()));
            black_box(processor.prepare_for_ocr().into_dynamic());
        });
    });
}

/// Clean a page-sized block of OCR output with interleaved blank lines.
fn bench_clean_text(c: &mut Criterion) {
    let raw: String = (0..500)
        .map(|i| {
            if i % 3 == 0 {
                "   \n".to_string()
            } else {
                format!("  line {i} of recognised text  \n")
            }
        })
        .collect();

    c.bench_function("clean_text (500 lines)", |b| {
        b.iter(|| black_box(clean_text(black_box(&raw))));
    });
}

criterion_group!(benches, bench_prepare_for_ocr, bench_clean_text);
criterion_main!(benches);
