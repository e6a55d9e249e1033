//! Payload decoding: hex-pair reassembly and 7-bit septet unpacking.
//!
//! A message arrives as ASCII hex digits, two per byte. [`HexDecoder`]
//! rebuilds the bytes; [`Septets`] then walks those bytes and recovers the
//! packed 7-bit characters of the message text.

use crate::PAYLOAD_CAPACITY;
use heapless::Vec;

/// Reassembles bytes from a stream of hex-digit characters.
///
/// Decoding is permissive: only `'0'..='9'` and `'A'..='F'` carry a value,
/// every other character counts as a zero nibble, and every character
/// advances the high/low nibble phase. Bytes past capacity are dropped.
#[derive(Debug, Clone, Default)]
pub struct HexDecoder {
    bytes: Vec<u8, PAYLOAD_CAPACITY>,
    high_nibble: Option<u8>,
}

impl HexDecoder {
    /// Creates an empty decoder.
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            high_nibble: None,
        }
    }

    /// Clears decoded bytes and the nibble phase.
    pub fn reset(&mut self) {
        self.bytes.clear();
        self.high_nibble = None;
    }

    /// Consumes one character.
    pub fn push(&mut self, character: u8) {
        let nibble = nibble_value(character);

        match self.high_nibble.take() {
            None => self.high_nibble = Some(nibble),
            Some(high) => {
                // full buffer: drop silently
                let _ = self.bytes.push((high << 4) | nibble);
            }
        }
    }

    /// Returns the bytes decoded so far.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn nibble_value(character: u8) -> u8 {
    match character {
        b'0'..=b'9' => character - b'0',
        b'A'..=b'F' => character - b'A' + 10,
        _ => 0,
    }
}

/// Iterator over 7-bit characters packed LSB-first across bytes.
///
/// Yields at most `count` characters and stops early when the input runs out.
#[derive(Debug, Clone)]
pub struct Septets<'a> {
    bytes: &'a [u8],
    position: usize,
    carry: u8,
    /// Bits of the next source byte still to be consumed by the current
    /// character; 0 means the character comes entirely from `carry`.
    bits: u8,
    remaining: usize,
}

impl<'a> Septets<'a> {
    /// Unpacks up to `count` characters from `bytes`.
    pub fn new(bytes: &'a [u8], count: usize) -> Self {
        Self {
            bytes,
            position: 0,
            carry: 0,
            bits: 7,
            remaining: count,
        }
    }
}

impl Iterator for Septets<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }

        let mut septet = self.carry & ((1u8 << (7 - self.bits)) - 1);

        if self.bits != 0 {
            let Some(&byte) = self.bytes.get(self.position) else {
                self.remaining = 0;
                return None;
            };
            self.position += 1;
            septet |= byte << (7 - self.bits);
            self.carry = byte >> self.bits;
            self.bits -= 1;
        } else {
            self.bits = 7;
        }

        self.remaining -= 1;
        Some(septet & 0x7F)
    }
}

/// Errors from [`pack_septets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeptetError {
    /// The byte does not fit in seven bits.
    NotSeptet(u8),

    /// The packed text does not fit in the payload buffer.
    CapacityExceeded,
}

impl core::fmt::Display for SeptetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SeptetError::NotSeptet(byte) => {
                write!(f, "byte 0x{:02X} is not a 7-bit character", byte)
            }
            SeptetError::CapacityExceeded => {
                write!(f, "packed text exceeds payload capacity")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SeptetError {}

/// Packs 7-bit characters LSB-first, the inverse of [`Septets`].
///
/// # Errors
/// * `NotSeptet` - A byte has its top bit set
/// * `CapacityExceeded` - The packed form is longer than `PAYLOAD_CAPACITY`
pub fn pack_septets(text: &[u8]) -> Result<Vec<u8, PAYLOAD_CAPACITY>, SeptetError> {
    let mut packed = Vec::new();
    let mut accumulator: u16 = 0;
    let mut pending_bits = 0u32;

    for &character in text {
        if character > 0x7F {
            return Err(SeptetError::NotSeptet(character));
        }

        accumulator |= u16::from(character) << pending_bits;
        pending_bits += 7;

        if pending_bits >= 8 {
            packed
                .push(accumulator as u8)
                .map_err(|_| SeptetError::CapacityExceeded)?;
            accumulator >>= 8;
            pending_bits -= 8;
        }
    }

    if pending_bits > 0 {
        packed
            .push(accumulator as u8)
            .map_err(|_| SeptetError::CapacityExceeded)?;
    }

    Ok(packed)
}
