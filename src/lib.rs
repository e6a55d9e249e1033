#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`CommandParser`**: Byte-at-a-time AT command state machine with CR echo and ESC reset
//! - **`HexDecoder`** / **`Septets`**: Rebuild message bytes from hex digits and unpack 7-bit text
//! - **`MessageActions`** / **`Interpreter`**: Turn message characters into per-LED color targets
//! - **`FadeEngine`**: Integer-only constant-rate fades towards each LED's target
//! - **`StripTransmitter`**: One-bit-per-interrupt pulse serializer for WS281x strips
//! - **`Modem`**: Glue that the firmware main loop drives
//! - **`PulseSink`**, **`TickSource`**, **`Watchdog`**: Traits to implement for your hardware
//!
//! Colors are 8-bit [`Grb`] values in strip-native order; they convert to and
//! from `palette::Srgb<u8>`.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod command;
pub mod decoder;
pub mod fade;
pub mod modem;
pub mod parser;
pub mod reply;
pub mod strip;
pub mod time;
pub mod types;

pub use command::{Interpreter, MessageActions, StripAction};
pub use decoder::{HexDecoder, SeptetError, Septets, pack_septets};
pub use fade::{ChannelStep, FadeEngine, FadeEngine24, Target};
pub use modem::{Modem, Modem24};
pub use parser::{CommandParser, Dispatch, ParserState};
pub use reply::ReplyBuffer;
pub use strip::{PulseEncoding, PulseSink, StripTransmitter, StripTransmitter24};
pub use time::{TICK_HZ, TickSource, Watchdog};
pub use types::{Grb, LedIndex};

/// Command line buffer size; one byte stays reserved, so lines hold 191 bytes.
pub const LINE_CAPACITY: usize = 192;

/// Decoded message buffer size in bytes.
pub const PAYLOAD_CAPACITY: usize = 192;

/// Reply buffer size, one transport packet.
pub const REPLY_CAPACITY: usize = 64;

/// Default number of LEDs on the strip.
pub const LED_COUNT: usize = 24;

/// Fades take `2^FADE_DELAY_LOG2` ticks by default.
pub const FADE_DELAY_LOG2: u8 = 4;
