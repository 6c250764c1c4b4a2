// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imgtext — extract the text from one image into a .txt file.
//
// Entry point. Initialises logging and config, resolves the input path (from
// the command line or an interactive prompt) and runs a single extraction.

mod console;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use imgtext_core::config::default_config_path;
use imgtext_core::{AppConfig, LanguageCode, Result};
use imgtext_ocr::pipeline::{failure_message, run_extraction};
use imgtext_ocr::{
    ExtractRequest, TesseractEngine, TextRecognizer, derive_output_path, resolve_input,
};

/// OCR backend selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Engine {
    /// The system `tesseract` binary (supports chi_sim, chi_tra, eng, ...).
    Tesseract,
    /// Pure-Rust ocrs models (English only).
    #[cfg(feature = "ocrs")]
    Ocrs,
}

#[derive(Parser, Debug)]
#[command(
    name = "imgtext",
    version,
    about = "Extract the text from an image and save it as a .txt file next to it"
)]
struct Args {
    /// Image to read. Prompted for interactively when omitted.
    image: Option<String>,

    /// OCR language: chi_sim (default), chi_tra, eng, or chi_sim+eng for mixed text
    #[arg(long)]
    lang: Option<LanguageCode>,

    /// Convert to grayscale and upscale small images before recognition
    #[arg(long, default_value_t = false)]
    preprocess: bool,

    /// Where to write the text (default: the image path with a .txt extension)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/imgtext/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// OCR engine to use
    #[arg(long, value_enum, default_value_t = Engine::Tesseract)]
    engine: Engine,

    /// List the languages installed for Tesseract and exit
    #[arg(long, default_value_t = false)]
    list_langs: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error = %err, "imgtext aborted");
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// Returns whether text was extracted.
fn run(args: Args) -> Result<bool> {
    let config = load_config(args.config.clone())?;

    if args.list_langs {
        let languages = TesseractEngine::available_languages()?;
        println!("{}", console::format_languages(languages));
        return Ok(true);
    }

    println!("{}", console::banner());

    let from_prompt = args.image.is_none();
    let raw = match args.image {
        Some(path) => path,
        None => {
            let stdin = std::io::stdin();
            console::prompt(
                "Enter image path: ",
                &mut stdin.lock(),
                &mut std::io::stdout(),
            )?
        }
    };

    let input = resolve_input(&raw)?;
    let output = match args.output {
        Some(path) => std::path::absolute(path)?,
        None => derive_output_path(&input),
    };
    let language = args
        .lang
        .unwrap_or_else(|| config.default_language.clone());
    let preprocess = wants_preprocessing(args.preprocess, config.preprocess, from_prompt);
    let request = ExtractRequest::new(input, output, language).with_preprocessing(preprocess);

    let recognizer = build_recognizer(args.engine, &config, &request.language)?;
    tracing::info!(engine = recognizer.name(), "OCR engine ready");

    Ok(run_extraction(recognizer, &request, config.preview_chars).is_some())
}

/// `--preprocess` always wins. The config default only applies to an image
/// named on the command line; a prompted path gets the plain routine.
fn wants_preprocessing(flag: bool, config_default: bool, from_prompt: bool) -> bool {
    flag || (config_default && !from_prompt)
}

/// An explicitly named config file must load; the default one is optional.
fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::load_or_default(default_config_path())),
    }
}

fn build_recognizer(
    engine: Engine,
    config: &AppConfig,
    language: &LanguageCode,
) -> Result<Box<dyn TextRecognizer>> {
    match engine {
        Engine::Tesseract => {
            let version = TesseractEngine::version()?;
            tracing::debug!(%version, "Found tesseract");
            // Only a diagnostic: tesseract reports a missing model itself.
            if let Err(err) = TesseractEngine::check_language(language) {
                tracing::warn!(error = %err, "Tesseract language check failed");
            }
            Ok(Box::new(TesseractEngine::new(config.tesseract)))
        }
        #[cfg(feature = "ocrs")]
        Engine::Ocrs => Ok(Box::new(imgtext_ocr::OcrsEngine::with_defaults()?)),
    }
}
