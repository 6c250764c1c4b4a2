// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Console interaction: banner, interactive prompt, language listing.

use std::io::{BufRead, Write};

use imgtext_core::{ImgtextError, Result};

pub fn banner() -> String {
    format!("🔍 Image text extraction tool (Chinese supported)\n{}", "=".repeat(50))
}

/// Print `message` and read one line from `input`, without the line ending.
///
/// End of input and a blank answer are both [`ImgtextError::MissingInputPath`].
pub fn prompt(message: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<String> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Err(ImgtextError::MissingInputPath);
    }
    Ok(answer.to_string())
}

/// Render the installed language list, one per line, sorted.
pub fn format_languages(mut languages: Vec<String>) -> String {
    languages.sort();
    let mut out = format!("Installed OCR languages ({}):", languages.len());
    for lang in languages {
        out.push_str("\n  ");
        out.push_str(&lang);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn prompt_reads_and_trims_one_line() {
        let mut input = io::Cursor::new("  ./scan.png \nignored\n");
        let mut out = Vec::new();
        let answer = prompt("Enter image path: ", &mut input, &mut out).unwrap();
        assert_eq!(answer, "./scan.png");
        assert_eq!(String::from_utf8(out).unwrap(), "Enter image path: ");
    }

    #[test]
    fn eof_and_blank_answers_are_a_missing_path() {
        let mut out = Vec::new();
        let eof = prompt("> ", &mut io::Cursor::new(""), &mut out).unwrap_err();
        assert!(matches!(eof, ImgtextError::MissingInputPath));

        let blank = prompt("> ", &mut io::Cursor::new("   \n"), &mut out).unwrap_err();
        assert!(matches!(blank, ImgtextError::MissingInputPath));
    }

    #[test]
    fn languages_are_sorted() {
        let text = format_languages(vec!["eng".into(), "chi_tra".into(), "chi_sim".into()]);
        assert_eq!(
            text,
            "Installed OCR languages (3):\n  chi_sim\n  chi_tra\n  eng"
        );
    }

    #[test]
    fn banner_has_rule() {
        assert!(banner().ends_with(&"=".repeat(50)));
    }
}
