//! The emulated modem: ties the parser, interpreter and fade engine together.
//!
//! [`Modem`] is what the firmware main loop talks to. Inbound transport
//! chunks go to [`Modem::receive`], pending replies are flushed from
//! [`Modem::replies`], and [`Modem::service`] is polled to run the timer
//! driven fade and frame cycle.

use crate::LED_COUNT;
use crate::command::Interpreter;
use crate::fade::FadeEngine;
use crate::parser::{CommandParser, Dispatch, ParserState};
use crate::reply::ReplyBuffer;
use crate::strip::StripTransmitter;
use crate::time::{TickSource, Watchdog};

/// A GSM modem stand-in that renders SMS text on an LED strip.
///
/// # Type Parameters
/// * `LEDS` - Number of LEDs on the strip
#[derive(Debug, Clone)]
pub struct Modem<const LEDS: usize> {
    parser: CommandParser,
    replies: ReplyBuffer,
    interpreter: Interpreter,
    engine: FadeEngine<LEDS>,
}

impl<const LEDS: usize> Modem<LEDS> {
    /// Creates an idle modem with every LED off.
    pub fn new() -> Self {
        Self::with_engine(FadeEngine::new())
    }

    /// Creates an idle modem around a preconfigured fade engine.
    pub fn with_engine(engine: FadeEngine<LEDS>) -> Self {
        Self {
            parser: CommandParser::new(),
            replies: ReplyBuffer::new(),
            interpreter: Interpreter::new(),
            engine,
        }
    }

    /// Feeds inbound bytes to the command parser.
    ///
    /// Stops right after the first byte that queued a reply so the caller can
    /// flush it before continuing. Returns the number of bytes consumed; the
    /// caller passes the rest again once [`replies`](Self::replies) has been
    /// sent and cleared.
    pub fn receive<W: Watchdog>(&mut self, bytes: &[u8], watchdog: &mut W) -> usize {
        for (consumed, &byte) in bytes.iter().enumerate() {
            let before = self.replies.as_bytes().len();

            match self.parser.feed(byte, &mut self.replies) {
                Some(Dispatch::Message(message)) => {
                    self.interpreter.apply(message, &mut self.engine);
                }
                Some(Dispatch::ArmWatchdog) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("watchdog armed, reset pending");
                    watchdog.arm();
                }
                None => {}
            }

            if self.replies.as_bytes().len() != before || self.replies.overflowed() {
                return consumed + 1;
            }
        }

        bytes.len()
    }

    /// Runs one timer period if the timer fired.
    ///
    /// Hands a snapshot of the live colors to `transmitter` first, then
    /// advances every fade, so the frame going out is the state at the start
    /// of the period. Returns true if a tick was handled.
    ///
    /// A started transmission emits nothing until the first serial-clock
    /// event; see [`StripTransmitter::start`].
    pub fn service<T: TickSource>(
        &mut self,
        timer: &mut T,
        transmitter: &mut StripTransmitter<LEDS>,
    ) -> bool {
        if !timer.take_tick() {
            return false;
        }

        if !transmitter.start(self.engine.leds()) {
            #[cfg(feature = "defmt")]
            defmt::warn!("strip still busy, frame skipped");
        }

        self.engine.tick();
        true
    }

    /// Returns reply bytes waiting for the transport.
    pub fn replies(&self) -> &[u8] {
        self.replies.as_bytes()
    }

    /// Drops reply bytes the transport has taken.
    pub fn clear_replies(&mut self) {
        self.replies.clear();
    }

    /// Returns the parser state.
    pub fn state(&self) -> ParserState {
        self.parser.state()
    }

    /// Returns the fade engine.
    pub fn engine(&self) -> &FadeEngine<LEDS> {
        &self.engine
    }

    /// Returns the fade engine mutably, for effects driven outside of messages.
    pub fn engine_mut(&mut self) -> &mut FadeEngine<LEDS> {
        &mut self.engine
    }
}

impl<const LEDS: usize> Default for Modem<LEDS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Modem sized for the default strip.
pub type Modem24 = Modem<LED_COUNT>;
