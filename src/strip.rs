//! Self-terminating pulse transmission of a frame to a WS281x strip.
//!
//! Provides [`StripTransmitter`], which is meant to be driven from the
//! serial-clock completion interrupt: every call to
//! [`StripTransmitter::on_clock`] writes exactly one encoded bit to the
//! [`PulseSink`] and returns immediately. The frame is copied in when a
//! transmission starts, so the fade engine may keep mutating its live array
//! while the previous frame is still going out.

use crate::LED_COUNT;
use crate::types::Grb;

/// Trait for abstracting the serial data register that shapes the pulses.
///
/// Implement this for the SPI (or similar) peripheral clocking bits out to
/// the strip. Each pattern is one byte-time on the wire; the share of high
/// bits sets the pulse width the strip sees.
pub trait PulseSink {
    /// Queues one pulse pattern for transmission.
    fn write_pulse(&mut self, pattern: u8);
}

/// The two serial patterns that encode a data bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseEncoding {
    /// Long pulse for a `1` bit.
    pub one: u8,
    /// Short pulse for a `0` bit.
    pub zero: u8,
}

impl Default for PulseEncoding {
    fn default() -> Self {
        Self {
            one: 0xFF,
            zero: 0xF0,
        }
    }
}

/// Interrupt-driven serializer for one frame of `LEDS` colors.
///
/// Bits go out most significant first, in green, red, blue order per LED.
#[derive(Debug, Clone)]
pub struct StripTransmitter<const LEDS: usize> {
    frame: [Grb; LEDS],
    encoding: PulseEncoding,
    next_byte: usize,
    bit_position: u8,
    current: u8,
    busy: bool,
}

impl<const LEDS: usize> StripTransmitter<LEDS> {
    const FRAME_BYTES: usize = LEDS * 3;

    /// Creates an idle transmitter with the default pulse encoding.
    pub fn new() -> Self {
        Self::with_encoding(PulseEncoding::default())
    }

    /// Creates an idle transmitter with a custom pulse encoding.
    pub fn with_encoding(encoding: PulseEncoding) -> Self {
        Self {
            frame: [Grb::OFF; LEDS],
            encoding,
            next_byte: 0,
            bit_position: 0,
            current: 0,
            busy: false,
        }
    }

    /// Captures `leds` and arms a new transmission.
    ///
    /// A transmission in progress is never cut short; in that case nothing
    /// changes and `false` is returned.
    ///
    /// Starting only arms the transmitter; nothing is written to the sink.
    /// After a successful start the caller must trigger the first serial-clock
    /// event itself, by pending the completion interrupt or calling
    /// [`on_clock`](Self::on_clock) once, and that call emits the first bit.
    /// Every later bit is then paced by the interrupt.
    pub fn start(&mut self, leds: &[Grb; LEDS]) -> bool {
        if self.busy {
            return false;
        }

        self.frame = *leds;
        self.next_byte = 0;
        self.bit_position = 0;
        self.busy = true;
        true
    }

    /// Handles one serial-clock event.
    ///
    /// Emits the next bit and returns `true`, or, once the last bit of the
    /// last LED has gone out, stops and returns `false` without writing.
    pub fn on_clock<S: PulseSink>(&mut self, sink: &mut S) -> bool {
        if !self.busy {
            return false;
        }

        if self.bit_position == 0 {
            if self.next_byte == Self::FRAME_BYTES {
                self.busy = false;
                self.next_byte = 0;
                return false;
            }

            self.current = self.frame_byte(self.next_byte);
            self.next_byte += 1;
        }

        let pattern = if self.current & 0x80 != 0 {
            self.encoding.one
        } else {
            self.encoding.zero
        };
        sink.write_pulse(pattern);

        self.current <<= 1;
        self.bit_position = (self.bit_position + 1) & 0x7;
        true
    }

    /// Runs the current transmission to completion.
    ///
    /// For hosts and tests without a clock interrupt.
    pub fn drain<S: PulseSink>(&mut self, sink: &mut S) {
        while self.on_clock(sink) {}
    }

    /// Returns true while a frame is being sent.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the frame captured by the last start.
    pub fn frame(&self) -> &[Grb; LEDS] {
        &self.frame
    }

    fn frame_byte(&self, index: usize) -> u8 {
        self.frame[index / 3].to_bytes()[index % 3]
    }
}

impl<const LEDS: usize> Default for StripTransmitter<LEDS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Transmitter sized for the default strip.
pub type StripTransmitter24 = StripTransmitter<LED_COUNT>;
