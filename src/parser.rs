//! AT command recognizer.
//!
//! [`CommandParser`] consumes one byte per call and never blocks. Two inputs
//! are handled before the per-state transition: a carriage return always
//! queues a CRLF echo, and an escape forces the parser back to
//! [`ParserState::Idle`] so the transition below runs from there.

use crate::LINE_CAPACITY;
use crate::decoder::HexDecoder;
use crate::reply::{CPIN_READY, CRLF, OK, PROMPT, ReplyBuffer};
use heapless::Vec;

const CR: u8 = 0x0D;
const LF: u8 = 0x0A;
const ESC: u8 = 0x1B;
const CTRL_Z: u8 = 0x1A;

const SEND_MESSAGE: &[u8] = b"+CMGS=";
const PIN_QUERY: &[u8] = b"+CPIN?";
const ARM_RESET: &[u8] = b"Z9";

/// Where the parser is within a command exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParserState {
    /// Waiting for a carriage return to start a new line.
    Idle,
    /// Saw a carriage return; the next byte must be a line feed.
    WaitingForLineFeed,
    /// Expecting the `A` of `AT`.
    ExpectingA,
    /// Expecting the `T` of `AT`.
    ExpectingT,
    /// Accumulating the command text after `AT` until a carriage return.
    CollectingCommand,
    /// Decoding hex message digits until Ctrl-Z.
    CollectingMessage,
}

/// Work the caller must carry out after a byte was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<'a> {
    /// A complete message was received; these are its decoded bytes.
    Message(&'a [u8]),
    /// `ATZ9` was received; the supervisory watchdog must be armed.
    ArmWatchdog,
}

/// Byte-at-a-time AT command state machine.
#[derive(Debug, Clone)]
pub struct CommandParser {
    state: ParserState,
    line: Vec<u8, LINE_CAPACITY>,
    decoder: HexDecoder,
}

impl CommandParser {
    /// Creates an idle parser.
    pub const fn new() -> Self {
        Self {
            state: ParserState::Idle,
            line: Vec::new(),
            decoder: HexDecoder::new(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Returns the command text collected since the last `AT`.
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    /// Consumes one input byte, appending any reply to `replies`.
    ///
    /// Returns the action the caller has to perform, if the byte completed one.
    pub fn feed(&mut self, byte: u8, replies: &mut ReplyBuffer) -> Option<Dispatch<'_>> {
        if byte == CR {
            replies.append(CRLF);
        } else if byte == ESC {
            self.state = ParserState::Idle;
        }

        match self.state {
            ParserState::Idle => {
                if byte == CR {
                    self.state = ParserState::WaitingForLineFeed;
                }
                None
            }
            ParserState::WaitingForLineFeed => {
                self.state = if byte == LF {
                    ParserState::ExpectingA
                } else {
                    ParserState::Idle
                };
                None
            }
            ParserState::ExpectingA => {
                self.state = if byte == b'A' {
                    ParserState::ExpectingT
                } else {
                    ParserState::Idle
                };
                None
            }
            ParserState::ExpectingT => {
                if byte == b'T' {
                    self.line.clear();
                    self.state = ParserState::CollectingCommand;
                } else {
                    self.state = ParserState::Idle;
                }
                None
            }
            ParserState::CollectingCommand => {
                if byte == CR {
                    self.execute(replies)
                } else {
                    // one slot stays reserved, matching a terminated C string
                    if self.line.len() < LINE_CAPACITY - 1 {
                        let _ = self.line.push(byte);
                    }
                    None
                }
            }
            ParserState::CollectingMessage => {
                if byte == CTRL_Z {
                    replies.append(OK);
                    self.state = ParserState::Idle;
                    Some(Dispatch::Message(self.decoder.bytes()))
                } else {
                    self.decoder.push(byte);
                    None
                }
            }
        }
    }

    fn execute(&mut self, replies: &mut ReplyBuffer) -> Option<Dispatch<'_>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("AT{=[u8]:a}", self.line.as_slice());

        if self.line.starts_with(SEND_MESSAGE) {
            replies.append(PROMPT);
            self.line.clear();
            self.decoder.reset();
            self.state = ParserState::CollectingMessage;
            return None;
        }

        let mut dispatch = None;
        if self.line.starts_with(PIN_QUERY) {
            replies.append(CPIN_READY);
        } else if self.line.starts_with(ARM_RESET) {
            dispatch = Some(Dispatch::ArmWatchdog);
        }

        replies.append(OK);
        self.state = ParserState::WaitingForLineFeed;
        dispatch
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}
