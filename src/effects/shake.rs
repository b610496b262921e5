use std::time::Duration;

use rand::Rng;

use crate::{effects::decay::Decay, foundation::core::Offset};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Random positional jitter that fades out over an initial time window.
pub struct Shake {
    window: Duration,
    peak: u32,
    decay: Decay,
}

impl Shake {
    /// `peak` pixels at the start of `window`, fading along `decay`.
    pub fn new(window: Duration, peak: u32, decay: Decay) -> Self {
        Self {
            window,
            peak,
            decay,
        }
    }

    /// Length of the perturbation window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether `elapsed` still falls inside the window.
    pub fn is_active(&self, elapsed: Duration) -> bool {
        !self.window.is_zero() && elapsed < self.window
    }

    /// Fraction of the window still ahead of `elapsed`, in `[0, 1]`.
    pub fn remaining_fraction(&self, elapsed: Duration) -> f64 {
        if self.window.is_zero() {
            return 0.0;
        }
        let remaining = self.window.saturating_sub(elapsed);
        (remaining.as_secs_f64() / self.window.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Jitter amplitude in pixels at `elapsed`: the peak at zero, 0 from the end
    /// of the window on.
    pub fn magnitude_at(&self, elapsed: Duration) -> u32 {
        if !self.is_active(elapsed) {
            return 0;
        }
        let scaled = f64::from(self.peak) * self.decay.apply(self.remaining_fraction(elapsed));
        (scaled.floor() as u32).min(self.peak)
    }

    /// Random offset within `[-mag, mag]` on each axis for `elapsed`.
    ///
    /// Does not touch `rng` once the magnitude is zero.
    pub fn offset_at<R: Rng + ?Sized>(&self, elapsed: Duration, rng: &mut R) -> Offset {
        let mag = self.magnitude_at(elapsed) as i32;
        if mag == 0 {
            return Offset::ZERO;
        }
        Offset::new(rng.gen_range(-mag..=mag), rng.gen_range(-mag..=mag))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shake.rs"]
mod tests;
