//! Backup scheduler
//!
//! Makes sure the daily backup event is registered exactly once and, when it
//! fires, captures every tracked option independently.

use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::Settings;
use crate::error::{SnapError, SnapResult};
use crate::snapshot::{CaptureResult, SnapshotStore};

use super::{Period, ScheduledJob, TaskScheduler};

/// Name of the recurring backup event
pub const BACKUP_EVENT: &str = "optsnap-backup-options";

/// Per-option results of one backup cycle
#[derive(Debug, Default)]
pub struct BackupReport {
    pub outcomes: Vec<(String, SnapResult<CaptureResult>)>,
}

impl BackupReport {
    pub fn captured(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, r)| matches!(r, Ok(CaptureResult::Captured { .. })))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, r)| matches!(r, Ok(CaptureResult::Skipped)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|(_, r)| r.is_err()).count()
    }
}

/// Drives the recurring capture of all tracked options
pub struct BackupScheduler<'a> {
    settings: &'a Settings,
    snapshots: &'a SnapshotStore<'a>,
}

impl<'a> BackupScheduler<'a> {
    pub fn new(settings: &'a Settings, snapshots: &'a SnapshotStore<'a>) -> Self {
        Self {
            settings,
            snapshots,
        }
    }

    /// Register the daily backup event unless it already is
    ///
    /// Returns `true` when a new registration was made.
    pub fn ensure_scheduled(&self, scheduler: &dyn TaskScheduler) -> SnapResult<bool> {
        if scheduler.is_registered(BACKUP_EVENT)? {
            return Ok(false);
        }

        let start = self.snapshots.clock().now();
        scheduler.register(BACKUP_EVENT, start, Period::Daily)?;
        info!(event = BACKUP_EVENT, %start, "registered daily backup");
        Ok(true)
    }

    /// Capture every tracked option; one failure does not stop the rest
    pub fn on_trigger(&self) -> BackupReport {
        let mut report = BackupReport::default();

        for option in &self.settings.tracked_options {
            let result = self.snapshots.capture(option);
            if let Err(e) = &result {
                warn!(option = %option, error = %e, "capture failed");
            }
            report.outcomes.push((option.clone(), result));
        }

        report
    }
}

impl ScheduledJob for BackupScheduler<'_> {
    fn event_name(&self) -> &str {
        BACKUP_EVENT
    }

    fn run(&self) -> SnapResult<()> {
        let report = self.on_trigger();
        info!(
            captured = report.captured(),
            skipped = report.skipped(),
            failed = report.failed(),
            "backup cycle finished"
        );

        if report.failed() > 0 {
            let failed: Vec<&str> = report
                .outcomes
                .iter()
                .filter(|(_, r)| r.is_err())
                .map(|(option, _)| option.as_str())
                .collect();
            return Err(SnapError::Storage(format!(
                "backup failed for {}",
                failed.join(", ")
            )));
        }

        Ok(())
    }
}
