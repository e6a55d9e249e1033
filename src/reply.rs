//! Bounded outbound reply buffer.

use crate::REPLY_CAPACITY;
use heapless::Vec;

/// `"OK\r\n"`.
pub const OK: &[u8] = b"OK\r\n";
/// Line echo sent for every carriage return.
pub const CRLF: &[u8] = b"\r\n";
/// Prompt sent after `AT+CMGS=`.
pub const PROMPT: &[u8] = b"> ";
/// Status line sent for `AT+CPIN?`.
pub const CPIN_READY: &[u8] = b"+CPIN: READY\r\n";

/// Reply bytes waiting to be handed to the transport.
///
/// Holds at most one transport packet. The caller flushes it before feeding
/// more input; bytes appended past capacity are dropped and the buffer
/// remembers that it overflowed until it is cleared.
#[derive(Debug, Clone, Default)]
pub struct ReplyBuffer {
    bytes: Vec<u8, REPLY_CAPACITY>,
    overflowed: bool,
}

impl ReplyBuffer {
    /// Creates an empty reply buffer.
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            overflowed: false,
        }
    }

    /// Appends reply bytes, truncating at capacity.
    pub fn append(&mut self, reply: &[u8]) {
        let room = REPLY_CAPACITY - self.bytes.len();
        let (fits, dropped) = reply.split_at(reply.len().min(room));
        // `fits` never exceeds the remaining room
        let _ = self.bytes.extend_from_slice(fits);

        if !dropped.is_empty() {
            self.overflowed = true;
            #[cfg(feature = "defmt")]
            defmt::warn!("reply buffer full, dropped {} bytes", dropped.len());
        }
    }

    /// Returns the pending reply bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns true if nothing is waiting to be sent.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true if bytes were dropped since the last clear.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Discards the pending bytes once the transport has taken them.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.overflowed = false;
    }
}
