//! Wall-clock anchor.
//!
//! The device has no RTC; SNTP gives one absolute reading and embassy-time
//! provides monotonic uptime from there. Drift over the hourly fetch
//! cadence is far below the minute resolution the display works at.

use embassy_time::Instant as Uptime;

use spotti_core::clock::Instant;

/// Unix time derived from one SNTP reading plus monotonic uptime.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    /// Unix seconds at uptime zero.
    boot_unix_secs: i64,
}

impl WallClock {
    /// Anchor the clock; `unix_now` is the Unix time of this call.
    pub fn anchor(unix_now: i64) -> Self {
        Self {
            boot_unix_secs: unix_now - Uptime::now().as_secs() as i64,
        }
    }

    /// Current time.
    pub fn now(&self) -> Instant {
        Instant::from_secs(self.boot_unix_secs + Uptime::now().as_secs() as i64)
    }
}
