//! Persisted container format binding model and payload together.
//!
//! The container is what the encoder writes to storage and the decoder
//! reads back: the original symbol count, the frequency table the model is
//! rebuilt from, and the packed bitstream with its logical bit length. The
//! decoder never infers frequencies from the bitstream.
//!
//! # Byte Layout
//!
//! All integers little-endian:
//!
//! ```text
//! +--------------------+
//! | text_length (4)    |  u32 symbols in the original sequence
//! +--------------------+
//! | symbol_count (2)   |  u16 distinct symbols in the model
//! +--------------------+
//! | per symbol:        |
//! |   byte_len (2)     |  u16 length of the UTF-8 encoding
//! |   bytes (variable) |  the symbol's UTF-8 encoding
//! |   frequency (4)    |  u32 occurrence count
//! +--------------------+
//! | bit_length (4)     |  u32 meaningful bits in payload
//! +--------------------+
//! | payload            |  ceil(bit_length/8) bytes, MSB-first,
//! | (variable)         |  zero-padded tail
//! +--------------------+
//! ```
//!
//! Symbol records are written in canonical (code point) order; the decoder
//! rebuilds the cumulative model from the parsed counts with the same pure
//! function the encoder used, so both sides derive identical boundaries.
//! Bytes past the payload are ignored.

use std::collections::BTreeMap;

use crate::bitio::BitReader;
use crate::coder::{Decoder, Encoder};
use crate::error::{ContainerError, Error, Result};
use crate::model::{count_frequencies, CumulativeModel};

/// A parsed container: everything needed to reconstruct the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Number of symbols in the original sequence
    pub text_length: u32,

    /// Frequency table the model is rebuilt from
    pub counts: BTreeMap<char, u32>,

    /// Number of meaningful bits in `payload`
    pub bit_length: u32,

    /// Packed bitstream, zero-padded to whole bytes
    pub payload: Vec<u8>,
}

/// Serialize a container from its parts.
///
/// # Errors
/// - `ContainerError::AlphabetTooLarge` if `counts` has more entries than
///   the u16 symbol count field can hold
/// - `ContainerError::BitLengthOverflow` if `bit_length` exceeds u32
pub fn serialize_container(
    text_length: u32,
    counts: &BTreeMap<char, u32>,
    bit_length: u64,
    payload: &[u8],
) -> Result<Vec<u8>> {
    let symbol_count: u16 = counts
        .len()
        .try_into()
        .map_err(|_| ContainerError::AlphabetTooLarge {
            count: counts.len(),
        })?;
    let bit_length: u32 = bit_length
        .try_into()
        .map_err(|_| ContainerError::BitLengthOverflow { bits: bit_length })?;

    // Header + worst-case symbol records + payload
    let mut out = Vec::with_capacity(10 + counts.len() * 10 + payload.len());

    out.extend_from_slice(&text_length.to_le_bytes());
    out.extend_from_slice(&symbol_count.to_le_bytes());

    let mut utf8 = [0u8; 4];
    for (&symbol, &frequency) in counts {
        let encoded = symbol.encode_utf8(&mut utf8);
        out.extend_from_slice(&(encoded.len() as u16).to_le_bytes());
        out.extend_from_slice(encoded.as_bytes());
        out.extend_from_slice(&frequency.to_le_bytes());
    }

    out.extend_from_slice(&bit_length.to_le_bytes());
    out.extend_from_slice(payload);

    Ok(out)
}

/// Parse a container from bytes.
///
/// # Errors
/// - `ContainerError::Truncated` if the buffer ends inside any field
/// - `ContainerError::InvalidSymbol` if a symbol record is not exactly one
///   UTF-8 scalar value
pub fn parse_container(bytes: &[u8]) -> Result<Container> {
    let mut cursor = Cursor { bytes, pos: 0 };

    let text_length = cursor.read_u32()?;
    let symbol_count = cursor.read_u16()?;

    let mut counts = BTreeMap::new();
    for _ in 0..symbol_count {
        let byte_len = cursor.read_u16()? as usize;
        let symbol = parse_symbol(cursor.take(byte_len)?)?;
        let frequency = cursor.read_u32()?;
        counts.insert(symbol, frequency);
    }

    let bit_length = cursor.read_u32()?;
    let payload_len = ((bit_length as u64 + 7) / 8) as usize;
    let payload = cursor.take(payload_len)?.to_vec();

    Ok(Container {
        text_length,
        counts,
        bit_length,
        payload,
    })
}

/// Encode a text into a complete container.
///
/// Counts frequencies over the whole input, builds the cumulative model,
/// runs the arithmetic encoder and serializes the result. Deterministic:
/// identical input yields byte-identical output.
///
/// # Errors
/// - `Error::EmptyInput` if `text` is empty
/// - `Error::TotalOverflow` if the input is too long for the coder register
pub fn encode_text(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let counts = count_frequencies(text);
    let model = CumulativeModel::from_counts(&counts)?;

    let mut encoder = Encoder::new(&model)?;
    for ch in text.chars() {
        let index = model
            .index_of(ch)
            .expect("symbol was counted from this text");
        encoder.encode(index);
    }
    let (payload, bit_length) = encoder.finish();

    // total == number of input symbols, and Encoder::new bounds it
    serialize_container(model.total() as u32, &counts, bit_length, &payload)
}

/// Decode a container back into the original text.
///
/// Consumes exactly `text_length` symbols regardless of remaining stream
/// length; trailing payload bits are ignored.
///
/// # Errors
/// - Container parse errors for truncated/malformed buffers
/// - `ModelError::Empty` if the persisted frequency table has no symbols
///   (corrupt or truncated container)
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    let container = parse_container(bytes)?;
    let model = CumulativeModel::from_counts(&container.counts)?;

    let reader = BitReader::new(&container.payload, container.bit_length as u64);
    let mut decoder = Decoder::new(&model, reader)?;

    let mut text = String::with_capacity(container.text_length as usize);
    for _ in 0..container.text_length {
        text.push(decoder.next_symbol());
    }
    Ok(text)
}

/// Sequential parser over the container bytes.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> std::result::Result<&'a [u8], ContainerError> {
        let available = self.bytes.len() - self.pos;
        if available < n {
            return Err(ContainerError::Truncated {
                needed: n,
                available,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u16(&mut self) -> std::result::Result<u16, ContainerError> {
        Ok(u16::from_le_bytes(self.take(2)?.try_into().unwrap()))
    }

    fn read_u32(&mut self) -> std::result::Result<u32, ContainerError> {
        Ok(u32::from_le_bytes(self.take(4)?.try_into().unwrap()))
    }
}

fn parse_symbol(raw: &[u8]) -> std::result::Result<char, ContainerError> {
    let invalid = || ContainerError::InvalidSymbol {
        bytes: raw.to_vec(),
    };
    let text = std::str::from_utf8(raw).map_err(|_| invalid())?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The container for "aaab", every field hand-assembled.
    fn aaab_container() -> Vec<u8> {
        vec![
            0x04, 0x00, 0x00, 0x00, // text_length = 4
            0x02, 0x00, // symbol_count = 2
            0x01, 0x00, b'a', 0x03, 0x00, 0x00, 0x00, // 'a' x3
            0x01, 0x00, b'b', 0x01, 0x00, 0x00, 0x00, // 'b' x1
            0x05, 0x00, 0x00, 0x00, // bit_length = 5
            0b0101_1000, // payload
        ]
    }

    #[test]
    fn test_aaab_container_bytes() {
        let encoded = encode_text("aaab").unwrap();
        assert_eq!(encoded, aaab_container());
    }

    #[test]
    fn test_aaab_decodes() {
        assert_eq!(decode_text(&aaab_container()).unwrap(), "aaab");
    }

    #[test]
    fn test_serialize_parse_roundtrip() {
        let counts = count_frequencies("привет, мир");
        let payload = vec![0xDE, 0xAD, 0xBE];
        let bytes = serialize_container(11, &counts, 20, &payload).unwrap();

        let container = parse_container(&bytes).unwrap();
        assert_eq!(container.text_length, 11);
        assert_eq!(container.counts, counts);
        assert_eq!(container.bit_length, 20);
        assert_eq!(container.payload, payload);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(encode_text(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_truncated_at_every_field() {
        let full = aaab_container();
        // Any strict prefix must parse as Truncated, never panic.
        for cut in 0..full.len() {
            let result = parse_container(&full[..cut]);
            assert!(
                matches!(
                    result,
                    Err(Error::Container(ContainerError::Truncated { .. }))
                ),
                "prefix of {cut} bytes did not report truncation"
            );
        }
    }

    #[test]
    fn test_invalid_utf8_symbol_record() {
        let mut bytes = aaab_container();
        bytes[8] = 0xFF; // corrupt 'a' into an invalid UTF-8 byte
        assert!(matches!(
            parse_container(&bytes),
            Err(Error::Container(ContainerError::InvalidSymbol { .. }))
        ));
    }

    #[test]
    fn test_multi_char_symbol_record_rejected() {
        let counts = count_frequencies("ab");
        let mut bytes = serialize_container(2, &counts, 4, &[0x50]).unwrap();
        // Grow the first record's byte_len to swallow the next field.
        bytes[6] = 0x02;
        assert!(matches!(
            parse_container(&bytes),
            Err(Error::Container(ContainerError::InvalidSymbol { .. }))
        ));
    }

    #[test]
    fn test_empty_model_surfaces_on_decode() {
        // symbol_count = 0: structurally valid, semantically empty.
        let bytes = serialize_container(4, &BTreeMap::new(), 0, &[]).unwrap();
        assert!(matches!(
            decode_text(&bytes),
            Err(Error::Model(crate::error::ModelError::Empty))
        ));
    }

    #[test]
    fn test_zero_frequency_model_surfaces_on_decode() {
        let mut counts = BTreeMap::new();
        counts.insert('a', 0u32);
        let bytes = serialize_container(1, &counts, 0, &[]).unwrap();
        assert!(matches!(
            decode_text(&bytes),
            Err(Error::Model(crate::error::ModelError::Empty))
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = encode_text("aaab").unwrap();
        bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
        assert_eq!(decode_text(&bytes).unwrap(), "aaab");
    }

    #[test]
    fn test_alphabet_too_large() {
        let counts: BTreeMap<char, u32> = (0..0x12000u32)
            .filter_map(char::from_u32)
            .map(|c| (c, 1))
            .collect();
        assert!(counts.len() > u16::MAX as usize);

        assert!(matches!(
            serialize_container(counts.len() as u32, &counts, 0, &[]),
            Err(Error::Container(ContainerError::AlphabetTooLarge { .. }))
        ));
    }

    #[test]
    fn test_bit_length_overflow() {
        let counts = count_frequencies("a");
        assert!(matches!(
            serialize_container(1, &counts, u32::MAX as u64 + 1, &[]),
            Err(Error::Container(ContainerError::BitLengthOverflow { .. }))
        ));
    }

    #[test]
    fn test_multibyte_symbols_roundtrip() {
        let text = "день 🎈 день";
        let encoded = encode_text(text).unwrap();
        assert_eq!(decode_text(&encoded).unwrap(), text);
    }
}
