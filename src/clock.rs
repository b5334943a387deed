//! Wall-clock source for capture timestamps and schedule evaluation

use std::cell::Cell;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Supplies the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Start at a unix timestamp in seconds; out-of-range values clamp to the epoch
    pub fn at_timestamp(secs: i64) -> Self {
        Self::new(timestamp_to_datetime(secs).unwrap_or_default())
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(at);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Convert a unix timestamp in seconds to a UTC datetime
pub fn timestamp_to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Human-readable UTC date for a snapshot time key
pub fn format_time_key(secs: i64) -> String {
    timestamp_to_datetime(secs)
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}
