//! Loop configuration.

use super::ticker::TICK_INTERVAL;
use std::time::Duration;

/// Configuration for a [`Screen`](super::Screen) loop.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Cadence of `on_tick` while idle.
    pub tick_interval: Duration,
    /// Sleep between idle polls. Bounds key and tick latency.
    pub idle_sleep: Duration,
    /// Whether to hide the device cursor when the loop starts.
    pub hide_cursor: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            idle_sleep: Duration::from_millis(1),
            hide_cursor: true,
        }
    }
}
