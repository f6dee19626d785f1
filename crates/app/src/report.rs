//! Human-readable reporting for completed operations.

use std::time::Duration;

use crate::config::Config;

/// Print sizes, compression ratio and elapsed time after an encode.
pub fn print_encode_report(
    config: &Config,
    original_bytes: usize,
    compressed_bytes: usize,
    elapsed: Duration,
) {
    println!(
        "Encoded {} -> {}",
        config.input.display(),
        config.output.display()
    );
    println!("Original size:   {original_bytes} bytes");
    println!("Compressed size: {compressed_bytes} bytes");
    if compressed_bytes > 0 {
        let ratio = original_bytes as f64 / compressed_bytes as f64;
        println!("Compression ratio: {ratio:.3}");
    } else {
        println!("Compression finished, but the archive is empty");
    }
    println!("Elapsed: {:.3} s", elapsed.as_secs_f64());
}

/// Print elapsed time after a decode.
pub fn print_decode_report(config: &Config, elapsed: Duration) {
    println!(
        "Decoded {} -> {}",
        config.input.display(),
        config.output.display()
    );
    println!("Elapsed: {:.3} s", elapsed.as_secs_f64());
}
