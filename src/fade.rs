//! Per-LED fade engine with fixed-point constant-rate interpolation.
//!
//! Provides [`FadeEngine`], which owns the live color of every LED together
//! with its fade target. A new target is reached in a fixed number of ticks:
//! each channel gets a per-tick step expressed in 1/256ths of a unit and a
//! fractional accumulator, so the walk is integer-only and lands exactly on
//! the target.

use crate::types::{Grb, LedIndex};
use crate::{FADE_DELAY_LOG2, LED_COUNT};

/// Largest accepted fade length exponent; keeps every step exact.
pub const MAX_FADE_LOG2: u8 = 8;

/// Fixed-point stepping state for one color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelStep {
    /// Per-tick change in 1/256ths of a unit.
    pub increment: u16,
    /// Fractional part of the channel value carried between ticks.
    pub fraction: u8,
    /// Direction of travel.
    pub rising: bool,
}

impl ChannelStep {
    fn towards(current: u8, target: u8, fade_log2: u8) -> Self {
        let rising = target > current;
        let distance = u16::from(current.abs_diff(target));

        Self {
            increment: (distance << 8) >> fade_log2,
            fraction: 0,
            rising,
        }
    }

    fn advance(&mut self, current: u8) -> u8 {
        let change = u16::from(self.fraction) + self.increment;
        let whole = (change >> 8) as u8;
        self.fraction = change as u8;

        if self.rising {
            current.saturating_add(whole)
        } else {
            current.saturating_sub(whole)
        }
    }
}

/// Fade target and bookkeeping for one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Target {
    /// Color the LED is fading towards.
    pub color: Grb,
    /// Ticks left until `color` is reached.
    pub remaining: u16,
    green: ChannelStep,
    red: ChannelStep,
    blue: ChannelStep,
}

impl Target {
    /// Returns the stepping state of the green, red and blue channels.
    pub fn steps(&self) -> [ChannelStep; 3] {
        [self.green, self.red, self.blue]
    }
}

/// Drives a strip of `LEDS` LEDs towards their targets, one tick at a time.
///
/// LEDs are addressed with 1-based [`LedIndex`] values; [`LedIndex::ALL`]
/// addresses every LED and indices past the strip are ignored.
///
/// # Type Parameters
/// * `LEDS` - Number of LEDs on the strip
#[derive(Debug, Clone)]
pub struct FadeEngine<const LEDS: usize> {
    leds: [Grb; LEDS],
    targets: [Target; LEDS],
    fade_log2: u8,
}

impl<const LEDS: usize> FadeEngine<LEDS> {
    /// Creates an engine with every LED off and at rest.
    pub fn new() -> Self {
        Self::with_fade_log2(FADE_DELAY_LOG2)
    }

    /// Creates an engine whose fades take `2^fade_log2` ticks.
    ///
    /// Values above [`MAX_FADE_LOG2`] are clamped.
    pub fn with_fade_log2(fade_log2: u8) -> Self {
        Self {
            leds: [Grb::OFF; LEDS],
            targets: [Target::default(); LEDS],
            fade_log2: fade_log2.min(MAX_FADE_LOG2),
        }
    }

    /// Number of ticks a fade takes.
    pub fn fade_ticks(&self) -> u16 {
        1 << self.fade_log2
    }

    /// Aims one LED, or all of them for [`LedIndex::ALL`], at `color`.
    ///
    /// Each affected LED restarts its countdown and recomputes its steps from
    /// its current color. Out-of-range indices are ignored.
    pub fn set_target(&mut self, index: LedIndex, color: Grb) {
        let fade_log2 = self.fade_log2;
        let remaining = self.fade_ticks();

        let slots = self.leds.iter().zip(self.targets.iter_mut());
        for (position, (led, target)) in slots.enumerate() {
            if !index.is_all() && index.0 != position + 1 {
                continue;
            }

            *target = Target {
                color,
                remaining,
                green: ChannelStep::towards(led.g, color.g, fade_log2),
                red: ChannelStep::towards(led.r, color.r, fade_log2),
                blue: ChannelStep::towards(led.b, color.b, fade_log2),
            };
        }
    }

    /// Moves every target one LED further along the strip.
    ///
    /// LED `i` takes over the target of LED `i - 1` for `i` from the last LED
    /// down to 2, fading from wherever it currently is. LED 1 keeps its own
    /// target; the caller sets a new one if it wants to.
    pub fn shift(&mut self) {
        for position in (1..LEDS).rev() {
            let color = self.targets[position - 1].color;
            self.set_target(LedIndex(position + 1), color);
        }
    }

    /// Advances every LED by one tick.
    ///
    /// LEDs whose countdown already reached zero are rewritten with their
    /// exact target color.
    pub fn tick(&mut self) {
        for (led, target) in self.leds.iter_mut().zip(self.targets.iter_mut()) {
            if target.remaining == 0 {
                *led = target.color;
                continue;
            }

            target.remaining -= 1;
            led.g = target.green.advance(led.g);
            led.r = target.red.advance(led.r);
            led.b = target.blue.advance(led.b);
        }
    }

    /// Returns the live colors, LED 1 first.
    pub fn leds(&self) -> &[Grb; LEDS] {
        &self.leds
    }

    /// Returns the live color of one LED.
    pub fn color(&self, index: LedIndex) -> Option<Grb> {
        self.leds.get(index.0.checked_sub(1)?).copied()
    }

    /// Returns the fade target of one LED.
    pub fn target(&self, index: LedIndex) -> Option<&Target> {
        self.targets.get(index.0.checked_sub(1)?)
    }

    /// Returns true once no LED has fade ticks left.
    pub fn is_settled(&self) -> bool {
        self.targets.iter().all(|target| target.remaining == 0)
    }
}

impl<const LEDS: usize> Default for FadeEngine<LEDS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fade engine sized for the default strip.
pub type FadeEngine24 = FadeEngine<LED_COUNT>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_completes_immediately() {
        let step = ChannelStep::towards(42, 42, FADE_DELAY_LOG2);
        assert_eq!(step.increment, 0);
        assert!(!step.rising);
    }

    #[test]
    fn step_scales_distance_by_fade_length() {
        let up = ChannelStep::towards(0, 255, 4);
        assert_eq!(up.increment, 255 * 16);
        assert!(up.rising);

        let down = ChannelStep::towards(200, 10, 4);
        assert_eq!(down.increment, 190 * 16);
        assert!(!down.rising);
    }

    #[test]
    fn fraction_carries_between_ticks() {
        let mut step = ChannelStep::towards(0, 1, 4);
        let mut value = 0;
        for _ in 0..15 {
            value = step.advance(value);
            assert_eq!(value, 0);
        }
        value = step.advance(value);
        assert_eq!(value, 1);
        assert_eq!(step.fraction, 0);
    }

    #[test]
    fn set_target_steps_each_channel_from_the_live_color() {
        let mut engine = FadeEngine::<1>::new();
        engine.set_target(LedIndex(1), Grb::new(0, 160, 0));
        for _ in 0..engine.fade_ticks() {
            engine.tick();
        }

        engine.set_target(LedIndex(1), Grb::new(32, 0, 0));
        let [green, red, blue] = engine.target(LedIndex(1)).map(Target::steps).unwrap();

        assert!(!green.rising);
        assert_eq!(green.increment, 160 * 16);
        assert!(red.rising);
        assert_eq!(red.increment, 32 * 16);
        assert_eq!(blue.increment, 0);
    }

    #[test]
    fn fade_length_is_clamped() {
        let engine = FadeEngine::<2>::with_fade_log2(12);
        assert_eq!(engine.fade_ticks(), 256);
    }

    #[test]
    fn color_lookup_is_one_based() {
        let engine = FadeEngine::<3>::new();
        assert_eq!(engine.color(LedIndex::ALL), None);
        assert_eq!(engine.color(LedIndex(3)), Some(Grb::OFF));
        assert_eq!(engine.color(LedIndex(4)), None);
    }
}
