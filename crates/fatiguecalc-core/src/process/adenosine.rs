//! Adenosine tracker.

use serde::{Deserialize, Serialize};

/// Lower saturation bound.
pub const ADENOSINE_MIN: f64 = 0.5;
/// Upper saturation bound.
pub const ADENOSINE_MAX: f64 = 2.0;
/// Level at the start of every run.
pub const ADENOSINE_INITIAL: f64 = 1.0;

const CLEARANCE_PER_SLEEP_HOUR: f64 = 0.1;
const BUILDUP_PER_WAKE_HOUR: f64 = 0.05;

/// Saturating adenosine level, kept in `[0.5, 2.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adenosine(f64);

impl Default for Adenosine {
    fn default() -> Self {
        Self(ADENOSINE_INITIAL)
    }
}

impl Adenosine {
    /// Wrap an arbitrary level, saturating into bounds.
    pub fn new(level: f64) -> Self {
        Self(level.clamp(ADENOSINE_MIN, ADENOSINE_MAX))
    }

    pub fn level(self) -> f64 {
        self.0
    }

    /// Advance one hour: clear while asleep, build up while awake.
    pub fn step(self, asleep: bool) -> Self {
        if asleep {
            Self((self.0 - CLEARANCE_PER_SLEEP_HOUR).max(ADENOSINE_MIN))
        } else {
            Self((self.0 + BUILDUP_PER_WAKE_HOUR).min(ADENOSINE_MAX))
        }
    }
}
