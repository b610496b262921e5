/// Countdown of full-surface flash overlays with decreasing alpha.
///
/// With a count of 3 the overlays are drawn at alpha 255, 170 and 85.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashSchedule {
    total: u32,
    remaining: u32,
}

impl FlashSchedule {
    /// Schedule `count` flashes; zero disables flashing.
    pub fn new(count: u32) -> Self {
        Self {
            total: count,
            remaining: count,
        }
    }

    /// Flashes not yet drawn.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether another flash is due.
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Alpha of the next flash, consuming it.
    pub fn next_alpha(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let alpha = 255 * self.remaining / self.total.max(1);
        self.remaining -= 1;
        Some(alpha.min(255) as u8)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/flash.rs"]
mod tests;
