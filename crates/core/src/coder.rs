//! Arithmetic coding engine: interval narrowing, E1/E2/E3 renormalization,
//! and the encoder/decoder pair driving it.
//!
//! The coder maintains a `[low, high]` interval inside a 32-bit register and
//! narrows it to the sub-range owned by each symbol. Renormalization
//! re-expands the interval whenever its leading bit is decided (E1/E2) or it
//! straddles the middle without a decidable bit (E3), so the register never
//! runs out of precision even though the encoding of the whole document is
//! arbitrarily long.
//!
//! Encoder and decoder share one narrowing/classification routine with two
//! different effect bindings: the encoder emits a bit per renormalization,
//! the decoder consumes one into its `value` register. Keeping the interval
//! math in a single place is what guarantees the two sides cannot silently
//! diverge.
//!
//! All arithmetic is exact: `u64` intermediates with 32-bit masking. With
//! `total` capped at [`MAX_TOTAL`], the narrowing products stay well inside
//! `u64` range and the interval never shrinks below `total` wide.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::model::CumulativeModel;

/// Width of the interval register in bits.
pub const REGISTER_BITS: u32 = 32;

const MASK: u64 = (1 << REGISTER_BITS) - 1;
const HALF: u64 = 1 << (REGISTER_BITS - 1);
const QUARTER: u64 = 1 << (REGISTER_BITS - 2);

/// Largest model total the register supports.
///
/// After renormalization the interval is always more than a quarter of the
/// register wide, so any total up to a quarter register keeps every symbol's
/// sub-range non-empty.
pub const MAX_TOTAL: u64 = QUARTER;

/// Renormalization case: which part of the register the interval occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rescale {
    /// E1: entirely in `[0, HALF)`, shared leading bit 0
    Lower,
    /// E2: entirely in `[HALF, 2^W)`, shared leading bit 1
    Upper,
    /// E3: inside `[QUARTER, 3*QUARTER)`, no decidable bit yet
    Middle,
}

impl Rescale {
    /// Amount subtracted from `low`, `high` (and the decoder's `value`)
    /// before doubling.
    fn offset(self) -> u64 {
        match self {
            Rescale::Lower => 0,
            Rescale::Upper => HALF,
            Rescale::Middle => QUARTER,
        }
    }
}

/// The shared `[low, high]` interval state.
///
/// Invariant: `low <= high <= MASK` between operations.
#[derive(Debug, Clone)]
struct Interval {
    low: u64,
    high: u64,
}

impl Interval {
    fn full() -> Self {
        Self { low: 0, high: MASK }
    }

    /// Narrow to the sub-range `[cum_low, cum_high)` of `total`.
    ///
    /// Identical on both sides; exact integer arithmetic only.
    fn narrow(&mut self, cum_low: u64, cum_high: u64, total: u64) {
        let range = self.high - self.low + 1;
        self.high = self.low + range * cum_high / total - 1;
        self.low += range * cum_low / total;
    }

    /// Which renormalization rule applies, if any.
    fn classify(&self) -> Option<Rescale> {
        if self.high < HALF {
            Some(Rescale::Lower)
        } else if self.low >= HALF {
            Some(Rescale::Upper)
        } else if self.low >= QUARTER && self.high < 3 * QUARTER {
            Some(Rescale::Middle)
        } else {
            None
        }
    }

    /// Shift the classified offset out and double back to full precision.
    fn rescale(&mut self, kind: Rescale) {
        let offset = kind.offset();
        self.low = ((self.low - offset) << 1) & MASK;
        self.high = (((self.high - offset) << 1) & MASK) | 1;
    }
}

/// Bit-emitting encoder over a cumulative model.
///
/// Feed model indices with [`encode`](Encoder::encode), then call
/// [`finish`](Encoder::finish) to resolve the final interval and obtain the
/// packed bitstream with its logical bit length.
pub struct Encoder<'a> {
    model: &'a CumulativeModel,
    interval: Interval,
    /// Deferred E3 decisions, resolved with the next decided bit.
    pending_bits: u64,
    writer: BitWriter,
}

impl<'a> Encoder<'a> {
    /// Create an encoder for `model`.
    ///
    /// # Errors
    /// Returns `Error::TotalOverflow` if the model total exceeds
    /// [`MAX_TOTAL`]; past it the interval cannot be guaranteed to keep
    /// every symbol's sub-range non-empty.
    pub fn new(model: &'a CumulativeModel) -> Result<Self> {
        check_total(model.total())?;
        Ok(Self {
            model,
            interval: Interval::full(),
            pending_bits: 0,
            writer: BitWriter::new(),
        })
    }

    /// Encode one symbol by its model index.
    pub fn encode(&mut self, index: usize) {
        let (cum_low, cum_high) = self.model.bounds(index);
        self.interval.narrow(cum_low, cum_high, self.model.total());

        while let Some(kind) = self.interval.classify() {
            match kind {
                Rescale::Lower => self.emit(false),
                Rescale::Upper => self.emit(true),
                Rescale::Middle => self.pending_bits += 1,
            }
            self.interval.rescale(kind);
        }
    }

    /// Emit a decided bit followed by the deferred E3 complements.
    fn emit(&mut self, bit: bool) {
        self.writer.put_bit(bit);
        for _ in 0..self.pending_bits {
            self.writer.put_bit(!bit);
        }
        self.pending_bits = 0;
    }

    /// Resolve the final interval and return `(payload, bit_length)`.
    ///
    /// One more bit decision disambiguates the two remaining candidate
    /// intervals: the lower one if `low < QUARTER`, the upper otherwise.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        self.pending_bits += 1;
        self.emit(self.interval.low >= QUARTER);

        let bit_length = self.writer.bit_len();
        (self.writer.finish(), bit_length)
    }
}

/// Bit-consuming decoder over a cumulative model.
///
/// Mirrors the encoder's interval transitions exactly; each renormalization
/// step pulls one bit from the stream into the `value` register instead of
/// emitting one.
pub struct Decoder<'a, 'b> {
    model: &'a CumulativeModel,
    interval: Interval,
    value: u64,
    reader: BitReader<'b>,
}

impl<'a, 'b> Decoder<'a, 'b> {
    /// Create a decoder for `model`, priming `value` with the first
    /// register's worth of stream bits (zero-padded past the declared
    /// length).
    ///
    /// # Errors
    /// Returns `Error::TotalOverflow` under the same bound as the encoder.
    pub fn new(model: &'a CumulativeModel, mut reader: BitReader<'b>) -> Result<Self> {
        check_total(model.total())?;

        let mut value = 0u64;
        for _ in 0..REGISTER_BITS {
            value = (value << 1) | reader.next_bit();
        }

        Ok(Self {
            model,
            interval: Interval::full(),
            value,
            reader,
        })
    }

    /// Decode the next symbol and advance the interval in lock-step with
    /// the encoder.
    ///
    /// A corrupt payload yields garbage symbols, never a panic: the
    /// subtraction wraps and the scaled lookup clamps.
    pub fn next_symbol(&mut self) -> char {
        let total = self.model.total();
        let range = self.interval.high - self.interval.low + 1;
        // saturating_sub: a desynchronized value below low reads as offset 0
        // instead of underflowing.
        let offset = self.value.saturating_sub(self.interval.low);
        let scaled = ((offset + 1) * total - 1) / range;

        let index = self.model.index_for_scaled(scaled);
        let (cum_low, cum_high) = self.model.bounds(index);
        self.interval.narrow(cum_low, cum_high, total);

        while let Some(kind) = self.interval.classify() {
            self.value = self.value.wrapping_sub(kind.offset());
            self.interval.rescale(kind);
            self.value = ((self.value << 1) & MASK) | self.reader.next_bit();
        }

        self.model.symbol(index)
    }
}

fn check_total(total: u64) -> Result<()> {
    if total > MAX_TOTAL {
        return Err(Error::TotalOverflow {
            total,
            max: MAX_TOTAL,
        });
    }
    Ok(())
}
