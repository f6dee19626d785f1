//! aricode: arithmetic-coding file compressor.
//!
//! `encode` reads a UTF-8 text file, compresses it with a static-model
//! arithmetic coder and writes a self-contained archive; `decode` reverses
//! the transformation bit-exactly. Output files are only written after the
//! full transformation succeeds, so a failed run never leaves a partial
//! artifact behind.

mod config;
mod report;

use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use config::{Config, Mode};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("try `aricode --help`");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), String> {
    // Surfaced directly; no fallback search path is consulted.
    if !config.input.exists() {
        return Err(format!("input file not found: {}", config.input.display()));
    }

    match config.mode {
        Mode::Encode => encode(config),
        Mode::Decode => decode(config),
    }
}

fn encode(config: &Config) -> Result<(), String> {
    let start = Instant::now();

    let text = fs::read_to_string(&config.input)
        .map_err(|e| format!("cannot read {}: {e}", config.input.display()))?;
    let container = aricode_core::encode_text(&text).map_err(|e| e.to_string())?;
    fs::write(&config.output, &container)
        .map_err(|e| format!("cannot write {}: {e}", config.output.display()))?;

    if config.print_report {
        report::print_encode_report(config, text.len(), container.len(), start.elapsed());
    }
    Ok(())
}

fn decode(config: &Config) -> Result<(), String> {
    let start = Instant::now();

    let container = fs::read(&config.input)
        .map_err(|e| format!("cannot read {}: {e}", config.input.display()))?;
    let text = aricode_core::decode_text(&container).map_err(|e| e.to_string())?;
    fs::write(&config.output, text.as_bytes())
        .map_err(|e| format!("cannot write {}: {e}", config.output.display()))?;

    if config.print_report {
        report::print_decode_report(config, start.elapsed());
    }
    Ok(())
}
