//! Error types for the arithmetic coding system.
//!
//! All operations return structured errors rather than panicking.
//! Every failure is terminal for the encode/decode call that raised it;
//! retrying is the caller's decision.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Empty input: nothing to encode, rejected before any coding work
/// - Total overflow: the model's total frequency exceeds register capacity
/// - Model: cumulative table construction failures
/// - Container: persisted byte layout parse/serialize failures
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// The input sequence is empty; no model can be built.
    #[error("empty input: nothing to encode")]
    EmptyInput,

    /// The model's total frequency cannot be represented by the coder's
    /// 32-bit interval register without underflowing precision.
    #[error("total frequency {total} exceeds coder capacity {max}")]
    TotalOverflow { total: u64, max: u64 },

    /// Frequency model error (e.g., empty table during reconstruction)
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Container parse or serialize error
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Frequency model errors.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No symbols with non-zero frequency (cannot build a cumulative table).
    /// During decode this indicates a corrupt or truncated container.
    #[error("empty frequency table: cannot build cumulative model")]
    Empty,
}

/// Container format errors.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The byte buffer ends before the field being parsed.
    #[error("container truncated: need {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    /// A symbol record does not decode to exactly one Unicode scalar value.
    #[error("symbol record is not a single UTF-8 scalar value: {bytes:?}")]
    InvalidSymbol { bytes: Vec<u8> },

    /// More distinct symbols than the u16 symbol_count field can hold.
    #[error("alphabet size {count} exceeds the u16 symbol count field")]
    AlphabetTooLarge { count: usize },

    /// More payload bits than the u32 bit_length field can hold.
    #[error("bitstream length {bits} exceeds the u32 bit length field")]
    BitLengthOverflow { bits: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
