//! Canned color tables selected by message characters.
//!
//! Lowercase letters walk a 26-step rainbow from red through blue and green
//! back to red; digits pick one of ten grayscale levels. Entries are written
//! in strip-native green/red/blue order.

use crate::types::Grb;

const fn grb(g: u8, r: u8, b: u8) -> Grb {
    Grb { g, r, b }
}

/// Rainbow colors for `'a'..='z'`.
pub const RAINBOW: [Grb; 26] = [
    grb(0, 253, 3),
    grb(0, 226, 30),
    grb(0, 200, 56),
    grb(0, 173, 83),
    grb(0, 146, 110),
    grb(0, 116, 140),
    grb(0, 90, 166),
    grb(0, 63, 192),
    grb(0, 37, 218),
    grb(0, 10, 245),
    grb(39, 0, 217),
    grb(93, 0, 163),
    grb(145, 0, 111),
    grb(184, 0, 71),
    grb(210, 0, 45),
    grb(240, 0, 15),
    grb(245, 23, 0),
    grb(218, 77, 0),
    grb(192, 129, 0),
    grb(164, 171, 0),
    grb(135, 171, 0),
    grb(108, 171, 0),
    grb(82, 173, 0),
    grb(55, 200, 0),
    grb(29, 226, 0),
    grb(0, 255, 0),
];

/// Grayscale levels for `'0'..='9'`.
pub const GRAYSCALE: [Grb; 10] = [
    grb(0, 0, 0),
    grb(28, 28, 28),
    grb(56, 56, 56),
    grb(85, 85, 85),
    grb(113, 113, 113),
    grb(141, 141, 141),
    grb(170, 170, 170),
    grb(198, 198, 198),
    grb(226, 226, 226),
    grb(255, 255, 255),
];

/// Looks up the rainbow entry for a lowercase letter.
#[inline]
pub fn rainbow(letter: u8) -> Option<Grb> {
    RAINBOW.get(usize::from(letter.checked_sub(b'a')?)).copied()
}

/// Looks up the grayscale entry for a decimal digit.
#[inline]
pub fn grayscale(digit: u8) -> Option<Grb> {
    GRAYSCALE.get(usize::from(digit.checked_sub(b'0')?)).copied()
}
