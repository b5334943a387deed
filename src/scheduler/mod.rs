//! Scheduling for recurring backups
//!
//! - `TaskScheduler`: the host scheduler port (is an event registered,
//!   register an event)
//! - `ScheduledJob`: the callback a scheduler fires when an event is due
//! - `ScheduleRegistry`: file-backed scheduler used by the binary
//! - `BackupScheduler`: registers the daily backup event and captures every
//!   tracked option when it fires

mod backup;
mod registry;

pub use backup::{BackupReport, BackupScheduler, BACKUP_EVENT};
pub use registry::{DueRun, JobOutcome, ScheduleRegistry, ScheduledEvent};

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SnapResult;

/// Recurrence of a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Hourly,
    TwiceDaily,
    Daily,
    Weekly,
}

impl Period {
    pub fn duration(&self) -> Duration {
        match self {
            Period::Hourly => Duration::hours(1),
            Period::TwiceDaily => Duration::hours(12),
            Period::Daily => Duration::days(1),
            Period::Weekly => Duration::weeks(1),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Hourly => write!(f, "hourly"),
            Period::TwiceDaily => write!(f, "twicedaily"),
            Period::Daily => write!(f, "daily"),
            Period::Weekly => write!(f, "weekly"),
        }
    }
}

/// Host scheduler port
pub trait TaskScheduler {
    /// Whether an event with this name is already registered
    fn is_registered(&self, event: &str) -> SnapResult<bool>;

    /// Register a recurring event whose first run is `start`
    fn register(&self, event: &str, start: DateTime<Utc>, period: Period) -> SnapResult<()>;
}

/// Callback fired by a scheduler when its event is due
pub trait ScheduledJob {
    fn event_name(&self) -> &str;

    fn run(&self) -> SnapResult<()>;
}
