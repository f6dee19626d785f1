//! aricode-core: lossless arithmetic coding with a static per-document model
//!
//! This library compresses a sequence of Unicode symbols into a
//! near-entropy-optimal bitstream and reconstructs it bit-exactly. The model
//! is order-0 and static: symbol frequencies are counted once over the whole
//! input before any bit is emitted, and the decoder rebuilds the identical
//! model from the persisted frequency table.
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `model`: canonical cumulative frequency table
//! - `bitio`: low-level MSB-first bit reading/writing
//! - `coder`: interval narrowing, E1/E2/E3 renormalization, encoder, decoder
//! - `container`: persisted byte layout binding model and payload together
//!
//! # Design Principles
//!
//! - **No panics**: all failures are structured and recoverable
//! - **Exact arithmetic**: integer-only interval math, identical on both
//!   sides, so encoder and decoder stay bit-synchronized
//! - **Deterministic**: the same input always yields byte-identical output

pub mod bitio;
pub mod coder;
pub mod container;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use container::{decode_text, encode_text};
pub use error::{Error, Result};
