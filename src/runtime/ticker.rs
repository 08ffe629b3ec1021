//! Tick clock: Fixed-step tick deadlines for the idle wait.
//!
//! The baseline advances by exactly one interval per tick, never by the real
//! elapsed time. A late clock fires one tick per check until it is back
//! within one interval of wall time; it never merges missed ticks into one
//! larger step.

use std::time::{Duration, Instant};

/// Default tick cadence.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Fixed-step tick clock.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    baseline: Instant,
    interval: Duration,
    ticks: u64,
}

impl TickClock {
    /// Start a clock whose first tick is due one interval after `start`.
    pub const fn new(start: Instant, interval: Duration) -> Self {
        Self {
            baseline: start,
            interval,
            ticks: 0,
        }
    }

    /// Restart from `start`, keeping the interval.
    pub const fn reset(&mut self, start: Instant) {
        self.baseline = start;
        self.ticks = 0;
    }

    /// Check for a due tick at `now`.
    ///
    /// Returns `true` and advances the baseline by one interval if at least
    /// one interval has passed since the baseline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.baseline) >= self.interval {
            self.baseline += self.interval;
            self.ticks += 1;
            true
        } else {
            false
        }
    }

    /// Number of ticks fired since the last reset.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// How far the baseline trails `now`.
    pub fn lag(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.baseline)
    }
}
