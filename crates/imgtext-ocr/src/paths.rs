// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input and output path handling.

use std::path::{Path, PathBuf};

use imgtext_core::error::Result;
use tracing::debug;

/// Extension given to the extracted text file.
pub const OUTPUT_EXTENSION: &str = "txt";

/// Turn a user-supplied path into an absolute one.
///
/// Surrounding whitespace and one pair of matching quotes are stripped, since
/// terminals quote paths dropped onto them. Relative paths are resolved
/// against the current directory; symlinks are left alone.
pub fn resolve_input(raw: &str) -> Result<PathBuf> {
    let trimmed = strip_quotes(raw.trim());
    let path = std::path::absolute(Path::new(trimmed))?;
    debug!(raw, resolved = %path.display(), "Input path resolved");
    Ok(path)
}

/// The input path with its final extension replaced by `.txt`.
pub fn derive_output_path(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension(OUTPUT_EXTENSION)
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
