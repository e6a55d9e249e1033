//! Shared test infrastructure for sms-fade integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use sms_fade::{PulseSink, TickSource, Watchdog, pack_septets};

// ============================================================================
// Mock Hardware
// ============================================================================

/// Pulse sink that records every pattern written
pub struct MockSink {
    pub pulses: Vec<u8>,
}

impl MockSink {
    pub fn new() -> Self {
        Self { pulses: Vec::new() }
    }

    /// Rebuild the transmitted bytes from the recorded pulses
    pub fn bytes(&self) -> Vec<u8> {
        self.pulses
            .chunks(8)
            .map(|bits| {
                bits.iter()
                    .fold(0u8, |byte, &pulse| (byte << 1) | u8::from(pulse == 0xFF))
            })
            .collect()
    }
}

impl PulseSink for MockSink {
    fn write_pulse(&mut self, pattern: u8) {
        self.pulses.push(pattern);
    }
}

/// Timer that fires once per `fire()` call
pub struct MockTimer {
    pending: bool,
}

impl MockTimer {
    pub fn new() -> Self {
        Self { pending: false }
    }

    pub fn fire(&mut self) -> &mut Self {
        self.pending = true;
        self
    }
}

impl TickSource for MockTimer {
    fn take_tick(&mut self) -> bool {
        core::mem::take(&mut self.pending)
    }
}

/// Watchdog that counts how often it was armed
pub struct MockWatchdog {
    pub armed: u32,
}

impl MockWatchdog {
    pub fn new() -> Self {
        Self { armed: 0 }
    }
}

impl Watchdog for MockWatchdog {
    fn arm(&mut self) {
        self.armed += 1;
    }
}

// ============================================================================
// Message Builders
// ============================================================================

/// Build the decoded form of an outgoing message carrying `text`, addressed
/// to an 11-digit number
pub fn message_bytes(text: &[u8]) -> Vec<u8> {
    let mut message = vec![0x00, 0x01, 0x00, 0x0B, 0x91];
    message.extend_from_slice(&[0x64, 0x07, 0x05, 0x10, 0x00, 0xF1]);
    message.extend_from_slice(&[0x00, 0x00]);
    message.push(text.len() as u8);
    message.extend_from_slice(&pack_septets(text).unwrap());
    message
}

/// Hex-encode bytes the way a host sends them after the `> ` prompt
pub fn hex(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|byte| format!("{:02X}", byte).into_bytes())
        .collect()
}

/// Full host transcript sending `text` as one SMS, ending with Ctrl-Z
pub fn send_sms(text: &[u8]) -> Vec<u8> {
    let message = message_bytes(text);
    let mut input = format!("\r\nAT+CMGS={}\r", message.len() - 1).into_bytes();
    input.extend(hex(&message));
    input.push(0x1A);
    input
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Feed every byte to the modem, collecting and flushing replies as a
/// transport would
pub fn exchange<const LEDS: usize>(
    modem: &mut sms_fade::Modem<LEDS>,
    input: &[u8],
    watchdog: &mut MockWatchdog,
) -> Vec<u8> {
    let mut output = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let consumed = modem.receive(rest, watchdog);
        output.extend_from_slice(modem.replies());
        modem.clear_replies();
        rest = &rest[consumed..];
    }

    output
}
