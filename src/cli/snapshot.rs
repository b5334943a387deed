//! Snapshot CLI commands
//!
//! Implements `list`, `view`, `restore` and `now`.

use clap::Args;

use crate::clock::format_time_key;
use crate::display::{format_backup_list, format_value, ListFormat, ViewFormat};
use crate::error::{SnapError, SnapResult};
use crate::restore::{NowStatus, RestoreController, RestoreOutcome};
use crate::snapshot::{CaptureResult, SnapshotKey};

use super::prompt::TerminalPrompt;

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ListFormat,
}

/// Arguments for `view`
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Option name
    pub name: Option<String>,

    /// Backup time key, or 'latest'
    #[arg(default_value = "latest")]
    pub key: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: ViewFormat,
}

/// Arguments for `restore`
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Option name
    pub name: Option<String>,

    /// Backup time key, or 'latest'
    #[arg(default_value = "latest")]
    pub key: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `now`
#[derive(Args, Debug)]
pub struct NowArgs {
    /// Skip eviction warnings
    #[arg(short, long)]
    pub yes: bool,
}

/// Print backup metadata for every tracked option with a live value
pub fn handle_list(controller: &RestoreController, args: ListArgs) -> SnapResult<()> {
    let rows = controller.list()?;
    print!("{}", format_backup_list(&rows, args.format)?);
    Ok(())
}

/// Print one snapshot value
pub fn handle_view(controller: &RestoreController, args: ViewArgs) -> SnapResult<()> {
    let key: SnapshotKey = args.key.parse()?;
    let snapshot = controller.view(args.name.as_deref(), &key)?;
    println!("{}", format_value(&snapshot.value, args.format)?);
    Ok(())
}

/// Restore a snapshot into the live value
pub fn handle_restore(controller: &RestoreController, args: RestoreArgs) -> SnapResult<()> {
    let key: SnapshotKey = args.key.parse()?;
    let prompt = TerminalPrompt::new(args.yes);

    match controller.restore(args.name.as_deref(), &key, &prompt)? {
        RestoreOutcome::AlreadyCurrent(plan) => {
            println!(
                "Selected backup matches existing value of {}. Nothing to restore.",
                plan.option
            );
        }
        RestoreOutcome::Declined(_) => {
            println!("Aborted.");
        }
        RestoreOutcome::Restored(plan) => {
            println!(
                "Success: Restored {} from backup {} ({} UTC).",
                plan.option, plan.time_key, plan.date
            );
        }
    }

    Ok(())
}

/// Back up every tracked option immediately
pub fn handle_now(controller: &RestoreController, args: NowArgs) -> SnapResult<()> {
    let prompt = TerminalPrompt::new(args.yes);
    let outcomes = controller.backup_now(&prompt)?;
    let mut failed = 0;

    for outcome in outcomes {
        match outcome.status {
            NowStatus::Done(CaptureResult::Captured { time_key, evicted }) => {
                println!(
                    "Success: {} backed up as {} ({} UTC).",
                    outcome.option,
                    time_key,
                    format_time_key(time_key)
                );
                for key in evicted {
                    println!("  Removed oldest backup {}.", key);
                }
            }
            NowStatus::Done(CaptureResult::Skipped) => {
                println!("Skipped {}: no live value.", outcome.option);
            }
            NowStatus::Declined => {
                println!("Skipped {}: not confirmed.", outcome.option);
            }
            NowStatus::Failed(e) => {
                eprintln!("Error: {} was not backed up: {}", outcome.option, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(SnapError::Storage(format!(
            "{} option(s) could not be backed up",
            failed
        )));
    }

    Ok(())
}
