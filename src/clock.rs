use std::time::{Duration, Instant};

/// Monotonic time source for the render loops.
///
/// Times are offsets from an arbitrary, fixed origin.
pub trait Clock {
    /// Current time.
    fn now(&self) -> Duration;

    /// Block until `deadline`; returns at once if it already passed.
    fn sleep_until(&mut self, deadline: Duration);
}

/// Wall clock backed by [`Instant`] and a thread sleep.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep_until(&mut self, deadline: Duration) {
        let now = self.now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}

/// Clock that only moves when slept on or advanced by hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    now: Duration,
    sleeps: u64,
}

impl ManualClock {
    /// Clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `by`.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Number of `sleep_until` calls so far.
    pub fn sleeps(&self) -> u64 {
        self.sleeps
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep_until(&mut self, deadline: Duration) {
        self.sleeps += 1;
        self.now = self.now.max(deadline);
    }
}

#[cfg(test)]
#[path = "../tests/unit/clock.rs"]
mod tests;
