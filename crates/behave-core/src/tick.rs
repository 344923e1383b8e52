#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Step assumed when the host has no timing information (one 60 Hz frame).
pub const DEFAULT_STEP_SECONDS: f64 = 0.016;

/// Timing values supplied by the host for one tick.
///
/// Time-based nodes only accumulate `elapsed`; nothing in the engine schedules against
/// `accumulated` or `actual`, they are forwarded to actions untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickTime {
    /// Seconds since the previous tick.
    pub elapsed: f64,
    /// Seconds since the current run began.
    pub accumulated: f64,
    /// Host wall-clock timestamp in seconds.
    pub actual: f64,
}

impl TickTime {
    pub fn new(elapsed: f64, accumulated: f64, actual: f64) -> Self {
        Self {
            elapsed,
            accumulated,
            actual,
        }
    }

    /// A tick that only carries a delta.
    pub fn from_elapsed(elapsed: f64) -> Self {
        Self::new(elapsed, 0.0, 0.0)
    }

    /// The tick that follows `self` after `elapsed` more seconds.
    pub fn advance(self, elapsed: f64) -> Self {
        Self {
            elapsed,
            accumulated: self.accumulated + elapsed,
            actual: self.actual + elapsed,
        }
    }
}

impl Default for TickTime {
    fn default() -> Self {
        Self::from_elapsed(DEFAULT_STEP_SECONDS)
    }
}
