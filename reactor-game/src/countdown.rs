//! 1 Hz countdown shared by both mini-games.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownTick {
    Running(u32),
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    #[must_use]
    pub const fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    #[must_use]
    pub const fn remaining(self) -> u32 {
        self.remaining
    }

    /// Consume one second. The tick that would leave one second or less
    /// pins the clock at zero and reports expiry.
    pub fn tick(&mut self) -> CountdownTick {
        if self.remaining <= 1 {
            self.remaining = 0;
            CountdownTick::Expired
        } else {
            self.remaining -= 1;
            CountdownTick::Running(self.remaining)
        }
    }

    /// Whether the HUD should show the clock in its warning colour.
    #[must_use]
    pub const fn is_critical(self, threshold: u32) -> bool {
        self.remaining < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_configured_seconds() {
        let mut clock = Countdown::new(3);
        assert_eq!(clock.tick(), CountdownTick::Running(2));
        assert_eq!(clock.tick(), CountdownTick::Running(1));
        assert_eq!(clock.tick(), CountdownTick::Expired);
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.tick(), CountdownTick::Expired);
    }

    #[test]
    fn critical_threshold_is_strict() {
        assert!(Countdown::new(14).is_critical(15));
        assert!(!Countdown::new(15).is_critical(15));
    }
}
