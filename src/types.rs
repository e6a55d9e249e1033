//! Core types shared by the parser, interpreter and fade engine.

use palette::Srgb;

/// An 8-bit-per-channel LED color stored in strip-native order.
///
/// WS281x parts expect green, then red, then blue on the wire, so the fields
/// are laid out that way and [`Grb::to_bytes`] yields them in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grb {
    /// Green channel.
    pub g: u8,
    /// Red channel.
    pub r: u8,
    /// Blue channel.
    pub b: u8,
}

impl Grb {
    /// All channels off.
    pub const OFF: Grb = Grb { g: 0, r: 0, b: 0 };

    /// Creates a color from logical red, green and blue values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { g, r, b }
    }

    /// Returns the three channel bytes in transmission order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }
}

impl From<Srgb<u8>> for Grb {
    fn from(color: Srgb<u8>) -> Self {
        Grb::new(color.red, color.green, color.blue)
    }
}

impl From<Grb> for Srgb<u8> {
    fn from(color: Grb) -> Self {
        Srgb::new(color.r, color.g, color.b)
    }
}

/// A 1-based position on the strip.
///
/// Index 0 is not a physical LED; [`LedIndex::ALL`] uses it to address every
/// LED at once. Indices past the end of the strip are accepted and ignored by
/// the fade engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedIndex(pub usize);

impl LedIndex {
    /// Broadcast index addressing every LED.
    pub const ALL: LedIndex = LedIndex(0);

    /// The first physical LED.
    pub const FIRST: LedIndex = LedIndex(1);

    /// Returns true if this is the broadcast index.
    #[inline]
    pub fn is_all(self) -> bool {
        self.0 == 0
    }

    /// Returns the following index.
    #[inline]
    pub fn next(self) -> LedIndex {
        LedIndex(self.0.saturating_add(1))
    }
}

impl From<usize> for LedIndex {
    fn from(index: usize) -> Self {
        LedIndex(index)
    }
}

impl From<LedIndex> for usize {
    fn from(index: LedIndex) -> Self {
        index.0
    }
}
