//! Restore controller
//!
//! Operator-facing logic behind `list`, `view`, `restore` and `now`. Snapshot
//! history is only ever read here, except for `now` which runs captures.

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;
use tracing::info;

use crate::audit::AuditEntry;
use crate::clock::{format_time_key, Clock};
use crate::config::Settings;
use crate::error::{SnapError, SnapResult};
use crate::snapshot::{history_key, CaptureResult, Snapshot, SnapshotKey, SnapshotStore};

use super::prompt::Prompt;

/// One line of `list` output
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct BackupRow {
    pub option_name: String,
    pub option_backup_name: String,
    pub backup_count: usize,
    pub time_keys: String,
}

/// A resolved restore target and the live value it would replace
#[derive(Debug, Clone, PartialEq)]
pub struct RestorePlan {
    pub option: String,
    pub time_key: i64,
    /// UTC date of `time_key`
    pub date: String,
    pub current: Option<Value>,
    pub backup: Value,
}

impl RestorePlan {
    /// The live value already equals the backup
    pub fn is_noop(&self) -> bool {
        self.current.as_ref() == Some(&self.backup)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// Nothing to do; no prompt was shown and nothing was written
    AlreadyCurrent(RestorePlan),
    /// The operator said no; nothing was written
    Declined(RestorePlan),
    Restored(RestorePlan),
}

/// Result of `now` for one option
#[derive(Debug)]
pub struct NowOutcome {
    pub option: String,
    pub status: NowStatus,
}

#[derive(Debug)]
pub enum NowStatus {
    Done(CaptureResult),
    /// Eviction warning declined; the option was not captured
    Declined,
    Failed(SnapError),
}

pub struct RestoreController<'a> {
    settings: &'a Settings,
    snapshots: &'a SnapshotStore<'a>,
}

impl<'a> RestoreController<'a> {
    pub fn new(settings: &'a Settings, snapshots: &'a SnapshotStore<'a>) -> Self {
        Self {
            settings,
            snapshots,
        }
    }

    /// Backup metadata for every tracked option that has a live value
    pub fn list(&self) -> SnapResult<Vec<BackupRow>> {
        let mut rows = Vec::new();

        for option in &self.settings.tracked_options {
            if self.snapshots.live_value(option)?.is_none() {
                continue;
            }

            let listing = self.snapshots.list_snapshots(option)?;
            let keys: Vec<String> = listing.time_keys.iter().map(|k| k.to_string()).collect();

            rows.push(BackupRow {
                option_name: option.clone(),
                option_backup_name: history_key(option),
                backup_count: listing.time_keys.len(),
                time_keys: keys.join(", "),
            });
        }

        Ok(rows)
    }

    /// Resolve a snapshot for display
    pub fn view(&self, option: Option<&str>, key: &SnapshotKey) -> SnapResult<Snapshot> {
        let option = option.ok_or_else(SnapError::missing_option_name)?;
        self.snapshots.get_snapshot(option, key)
    }

    /// Resolve the restore target and compare it with the live value
    pub fn plan_restore(&self, option: Option<&str>, key: &SnapshotKey) -> SnapResult<RestorePlan> {
        let option = option.ok_or_else(SnapError::missing_option_name)?;
        let snapshot = self.snapshots.get_snapshot(option, key)?;
        let current = self.snapshots.live_value(option)?;

        Ok(RestorePlan {
            option: option.to_string(),
            time_key: snapshot.time_key,
            date: format_time_key(snapshot.time_key),
            current,
            backup: snapshot.value,
        })
    }

    /// Restore a snapshot into the live value after operator confirmation
    pub fn restore(
        &self,
        option: Option<&str>,
        key: &SnapshotKey,
        prompt: &dyn Prompt,
    ) -> SnapResult<RestoreOutcome> {
        let plan = self.plan_restore(option, key)?;

        if plan.is_noop() {
            info!(option = %plan.option, time_key = plan.time_key, "selected backup matches existing value");
            return Ok(RestoreOutcome::AlreadyCurrent(plan));
        }

        prompt.show_comparison(&plan)?;
        if !prompt.confirm("Okay to proceed with restoration?")? {
            return Ok(RestoreOutcome::Declined(plan));
        }

        self.apply(&plan)?;
        Ok(RestoreOutcome::Restored(plan))
    }

    /// Write the planned backup as the live value
    pub fn apply(&self, plan: &RestorePlan) -> SnapResult<()> {
        self.snapshots
            .set_live_value(&plan.option, plan.backup.clone())?;

        info!(option = %plan.option, time_key = plan.time_key, "restored option from backup");

        self.snapshots.record_audit(&AuditEntry::restore(
            self.snapshots.clock().now(),
            &plan.option,
            plan.time_key,
            plan.current.as_ref(),
            &plan.backup,
        ));

        Ok(())
    }

    /// Capture every tracked option now, confirming any eviction first
    pub fn backup_now(&self, prompt: &dyn Prompt) -> SnapResult<Vec<NowOutcome>> {
        let mut outcomes = Vec::new();

        for option in &self.settings.tracked_options {
            let status = match self.snapshots.list_snapshots(option) {
                Err(e) => NowStatus::Failed(e),
                Ok(listing) => {
                    let at_limit = listing.time_keys.len() >= self.snapshots.retention();
                    let question = format!("This will remove the oldest {} backup. Ok?", option);

                    if at_limit && !prompt.confirm(&question)? {
                        NowStatus::Declined
                    } else {
                        match self.snapshots.capture(option) {
                            Ok(result) => NowStatus::Done(result),
                            Err(e) => NowStatus::Failed(e),
                        }
                    }
                }
            };

            outcomes.push(NowOutcome {
                option: option.clone(),
                status,
            });
        }

        Ok(outcomes)
    }
}
