//! Scheduler and audit CLI commands

use crate::audit::AuditLogger;
use crate::clock::Clock;
use crate::error::SnapResult;
use crate::scheduler::{BackupScheduler, JobOutcome, ScheduleRegistry, ScheduledJob};

/// Run every scheduled event that is due
pub fn handle_tick(
    registry: &ScheduleRegistry,
    scheduler: &BackupScheduler,
    clock: &dyn Clock,
) -> SnapResult<()> {
    let jobs: [&dyn ScheduledJob; 1] = [scheduler];
    let runs = registry.run_due(clock.now(), &jobs)?;

    if runs.is_empty() {
        println!("No scheduled events due.");
        return Ok(());
    }

    for run in runs {
        let status = match &run.outcome {
            JobOutcome::Completed => "completed".to_string(),
            JobOutcome::Failed(e) => format!("failed: {}", e),
            JobOutcome::NoHandler => "no handler".to_string(),
        };
        println!(
            "{} (due {}) {}; next run {}",
            run.event,
            run.scheduled_for.format("%Y-%m-%d %H:%M:%S UTC"),
            status,
            run.next_run.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }

    Ok(())
}

/// Print the most recent audit entries
pub fn handle_log(audit: &AuditLogger, limit: usize) -> SnapResult<()> {
    let entries = audit.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
