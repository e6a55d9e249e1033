//! Message interpretation: turns decoded message text into strip actions.

use crate::colors::{self, GRAYSCALE};
use crate::decoder::Septets;
use crate::fade::FadeEngine;
use crate::types::{Grb, LedIndex};

/// Offset of the destination address length (in digits).
const ADDRESS_LENGTH_OFFSET: usize = 3;
/// Envelope bytes between the address and the text length.
const ENVELOPE_SKIP: usize = 7;

/// What one message character asks the strip to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripAction {
    /// Cascade every target one LED along the strip.
    Shift,
    /// Fade one LED, or all for [`LedIndex::ALL`], to a color.
    SetTarget {
        /// LED to retarget.
        index: LedIndex,
        /// New target color.
        color: Grb,
    },
    /// Leave the LED at the running position alone.
    Skip,
}

/// Iterator over the strip actions encoded in a decoded message.
///
/// Tracks the running LED position: it starts at 1, advances after every
/// character except `'>'`, and `'>'` resets it to 1.
#[derive(Debug, Clone)]
pub struct MessageActions<'a> {
    text: Septets<'a>,
    position: LedIndex,
}

impl<'a> MessageActions<'a> {
    /// Locates the text inside a decoded message envelope.
    ///
    /// Byte 3 gives the address length in digits; the text length byte sits
    /// `ceil(digits / 2) + 7` bytes into the message and the packed text
    /// follows it. A message too short to hold these fields yields nothing.
    pub fn new(message: &'a [u8]) -> Self {
        let text = message
            .get(ADDRESS_LENGTH_OFFSET)
            .map(|&digits| usize::from(digits).div_ceil(2) + ENVELOPE_SKIP)
            .and_then(|length_offset| {
                let count = *message.get(length_offset)?;
                let packed = message.get(length_offset + 1..)?;
                Some(Septets::new(packed, usize::from(count)))
            })
            .unwrap_or_else(|| Septets::new(&[], 0));

        Self {
            text,
            position: LedIndex::FIRST,
        }
    }
}

impl Iterator for MessageActions<'_> {
    type Item = StripAction;

    fn next(&mut self) -> Option<StripAction> {
        let character = self.text.next()?;

        if character == b'>' {
            self.position = LedIndex::FIRST;
            return Some(StripAction::Shift);
        }

        let target = match character {
            b'a'..=b'z' => colors::rainbow(character).map(|color| (self.position, color)),
            b'0'..=b'9' => colors::grayscale(character).map(|color| (self.position, color)),
            b'X' => Some((LedIndex::ALL, GRAYSCALE[0])),
            _ => None,
        };

        let action = match target {
            Some((index, color)) => StripAction::SetTarget { index, color },
            None => StripAction::Skip,
        };

        self.position = self.position.next();
        Some(action)
    }
}

/// Applies decoded messages to a fade engine.
///
/// Owns the staging color: the most recent color a message selected, which
/// is what the next target assignment uses.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    staged: Grb,
}

impl Interpreter {
    /// Creates an interpreter with nothing staged.
    pub const fn new() -> Self {
        Self { staged: Grb::OFF }
    }

    /// Returns the most recently staged color.
    pub fn staged(&self) -> Grb {
        self.staged
    }

    /// Runs every action of `message` against `engine`, in order.
    pub fn apply<const LEDS: usize>(&mut self, message: &[u8], engine: &mut FadeEngine<LEDS>) {
        for action in MessageActions::new(message) {
            #[cfg(feature = "defmt")]
            defmt::trace!("{}", action);

            match action {
                StripAction::Shift => engine.shift(),
                StripAction::SetTarget { index, color } => {
                    self.staged = color;
                    engine.set_target(index, color);
                }
                StripAction::Skip => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::RAINBOW;
    use crate::decoder::pack_septets;
    extern crate std;
    use std::vec::Vec;

    fn envelope(text: &[u8]) -> Vec<u8> {
        // SMSC, first octet, reference, 11-digit address, type, 6 address
        // bytes, PID, DCS, then the text length and the packed text
        let mut message = std::vec![0x00, 0x01, 0x00, 0x0B, 0x91];
        message.extend_from_slice(&[0x64, 0x07, 0x05, 0x10, 0x00, 0xF1]);
        message.extend_from_slice(&[0x00, 0x00]);
        message.push(text.len() as u8);
        message.extend_from_slice(&pack_septets(text).unwrap());
        message
    }

    fn actions(text: &[u8]) -> Vec<StripAction> {
        MessageActions::new(&envelope(text)).collect()
    }

    #[test]
    fn letters_and_digits_target_successive_leds() {
        assert_eq!(
            actions(b"a9"),
            [
                StripAction::SetTarget { index: LedIndex(1), color: RAINBOW[0] },
                StripAction::SetTarget { index: LedIndex(2), color: GRAYSCALE[9] },
            ]
        );
    }

    #[test]
    fn other_characters_skip_a_position() {
        assert_eq!(
            actions(b" !z"),
            [
                StripAction::Skip,
                StripAction::Skip,
                StripAction::SetTarget { index: LedIndex(3), color: RAINBOW[25] },
            ]
        );
    }

    #[test]
    fn shift_restarts_at_the_first_led() {
        assert_eq!(
            actions(b"ab>c"),
            [
                StripAction::SetTarget { index: LedIndex(1), color: RAINBOW[0] },
                StripAction::SetTarget { index: LedIndex(2), color: RAINBOW[1] },
                StripAction::Shift,
                StripAction::SetTarget { index: LedIndex(1), color: RAINBOW[2] },
            ]
        );
    }

    #[test]
    fn capital_x_broadcasts_off_and_advances() {
        assert_eq!(
            actions(b"Xa"),
            [
                StripAction::SetTarget { index: LedIndex::ALL, color: Grb::OFF },
                StripAction::SetTarget { index: LedIndex(2), color: RAINBOW[0] },
            ]
        );
    }

    #[test]
    fn odd_address_length_rounds_up() {
        let mut message = std::vec![0x00, 0x01, 0x00, 0x03, 0x91, 0x21, 0xF3, 0x00, 0x00];
        message.push(1);
        message.extend_from_slice(&pack_septets(b"q").unwrap());
        let actions: Vec<_> = MessageActions::new(&message).collect();
        assert_eq!(
            actions,
            [StripAction::SetTarget { index: LedIndex(1), color: RAINBOW[16] }]
        );
    }

    #[test]
    fn truncated_message_yields_nothing() {
        assert_eq!(MessageActions::new(&[]).count(), 0);
        assert_eq!(MessageActions::new(&[0x00, 0x01, 0x00, 0x0B]).count(), 0);
    }

    #[test]
    fn apply_stages_the_last_color() {
        let mut interpreter = Interpreter::new();
        let mut engine = FadeEngine::<4>::new();

        interpreter.apply(&envelope(b"b5"), &mut engine);

        assert_eq!(interpreter.staged(), GRAYSCALE[5]);
        assert_eq!(engine.target(LedIndex(1)).map(|t| t.color), Some(RAINBOW[1]));
        assert_eq!(engine.target(LedIndex(2)).map(|t| t.color), Some(GRAYSCALE[5]));
        assert_eq!(engine.target(LedIndex(3)).map(|t| t.color), Some(Grb::OFF));
    }
}
