//! Configuration for the aricode command-line tool.
//!
//! Handles parsing command-line arguments into a validated run
//! configuration. Two operations are exposed, mirroring the library's
//! surface: `encode <input> <output>` and `decode <input> <output>`.

use std::path::PathBuf;

/// Which direction to run the coder in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Compress a UTF-8 text file into a container
    Encode,
    /// Reconstruct the text from a container
    Decode,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Operation to perform
    pub mode: Mode,

    /// Source path (text for encode, container for decode)
    pub input: PathBuf,

    /// Destination path (written only after the full transform succeeds)
    pub output: PathBuf,

    /// Whether to print the timing/size report on success
    pub print_report: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut mode: Option<Mode> = None;
        let mut paths: Vec<PathBuf> = Vec::new();
        let mut print_report = true;

        for arg in args {
            match arg.as_str() {
                "encode" if mode.is_none() => mode = Some(Mode::Encode),
                "decode" if mode.is_none() => mode = Some(Mode::Decode),
                "--no-report" => print_report = false,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown option: {other}"));
                }
                path => paths.push(PathBuf::from(path)),
            }
        }

        let mode = mode.ok_or("expected a mode: encode or decode")?;
        if paths.len() != 2 {
            return Err(format!(
                "expected <input> <output>, got {} path(s)",
                paths.len()
            ));
        }
        let output = paths.pop().unwrap_or_default();
        let input = paths.pop().unwrap_or_default();

        Ok(Config {
            mode,
            input,
            output,
            print_report,
        })
    }
}

fn print_help() {
    println!("aricode: arithmetic-coding file compressor");
    println!();
    println!("USAGE:");
    println!("    aricode encode <input.txt> <output.arith>");
    println!("    aricode decode <input.arith> <output.txt>");
    println!();
    println!("OPTIONS:");
    println!("    --no-report    Don't print the timing/size report");
    println!("    --help, -h     Print this help");
    println!();
    println!("Encoding reads the input as UTF-8 text, builds a static");
    println!("frequency model over the whole document, and writes a");
    println!("self-contained archive. Decoding reverses it bit-exactly.");
}
