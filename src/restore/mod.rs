//! Restore system for optsnap
//!
//! - `RestoreController`: lists, views and restores snapshots, and runs an
//!   on-demand backup cycle
//! - `Prompt`: how the controller shows a pending restore and asks the
//!   operator to confirm it
//!
//! # Example
//!
//! ```rust,ignore
//! use optsnap::restore::{AssumeYes, RestoreController, RestoreOutcome};
//! use optsnap::snapshot::SnapshotKey;
//!
//! let controller = RestoreController::new(&settings, &snapshots);
//! match controller.restore(Some("siteurl"), &SnapshotKey::Latest, &AssumeYes)? {
//!     RestoreOutcome::AlreadyCurrent(_) => println!("Selected backup matches existing value."),
//!     RestoreOutcome::Restored(plan) => println!("Restored {} from {}", plan.option, plan.date),
//!     RestoreOutcome::Declined(_) => println!("Aborted."),
//! }
//! ```

mod controller;
mod prompt;

pub use controller::{
    BackupRow, NowOutcome, NowStatus, RestoreController, RestoreOutcome, RestorePlan,
};
pub use prompt::{AssumeYes, Prompt};
