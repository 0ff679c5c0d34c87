//! Periodic connection checks.

use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};

/// Fixed poll period; there is no backoff.
pub const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Ticker whose first tick fires immediately, so a check also runs on startup.
pub fn poller(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
