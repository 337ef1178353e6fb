//! Injected time source.
//!
//! The footer copyright assertion compares against the year *at run time*,
//! so the clock is a seam rather than a literal: `SystemClock` for real
//! runs, `FixedClock` for deterministic tests.

use chrono::{Datelike, TimeZone, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of "now" for time-dependent expectations.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;

    /// Calendar year (UTC) of the clock's current instant
    fn current_year(&self) -> i32 {
        let secs = (self.now_ms() / 1000) as i64;
        Utc.timestamp_opt(secs, 0)
            .single()
            .map_or(1970, |dt| dt.year())
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock pinned to a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant_ms: u64,
}

impl FixedClock {
    /// Pin the clock to an instant in milliseconds since the Unix epoch
    #[must_use]
    pub const fn at_ms(instant_ms: u64) -> Self {
        Self { instant_ms }
    }

    /// Pin the clock to midnight UTC on January 1st of `year`
    #[must_use]
    pub fn at_year(year: i32) -> Self {
        let instant_ms = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .map_or(0, |dt| dt.timestamp_millis().max(0) as u64);
        Self { instant_ms }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.instant_ms
    }
}
