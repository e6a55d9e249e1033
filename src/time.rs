//! Timer and supervisory hardware abstractions.

/// Nominal rate of the periodic fade timer.
pub const TICK_HZ: u32 = 50;

/// Trait for abstracting the periodic timer that paces fades and frames.
pub trait TickSource {
    /// Returns true, and acknowledges the event, if the timer fired since
    /// the last call.
    fn take_tick(&mut self) -> bool;
}

/// Trait for abstracting the supervisory watchdog.
pub trait Watchdog {
    /// Starts the watchdog. Nothing services it afterwards, so the device
    /// resets once it expires.
    fn arm(&mut self);
}
