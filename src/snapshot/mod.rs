//! Snapshot system for optsnap
//!
//! Each tracked option keeps a small history of its past values.
//!
//! # Storage Format
//!
//! The history of option `name` is stored in the same key-value store as the
//! live value, under `optsnap_backup_<name>`. It is a JSON object mapping
//! capture timestamps (seconds since epoch) to captured values, kept in
//! insertion order.
//!
//! # Retention Policy
//!
//! A capture appends the live value and then keeps only the last N entries
//! (3 by default). Eviction is strictly oldest-inserted first.
//!
//! # Example
//!
//! ```rust,ignore
//! use optsnap::snapshot::{SnapshotKey, SnapshotStore};
//!
//! let snapshots = SnapshotStore::new(&store, &SystemClock, &settings);
//! snapshots.capture("siteurl")?;
//! let latest = snapshots.get_snapshot("siteurl", &SnapshotKey::Latest)?;
//! ```

mod history;
mod key;
mod store;

pub use history::{Snapshot, SnapshotHistory};
pub use key::SnapshotKey;
pub use store::{history_key, CaptureResult, SnapshotListing, SnapshotStore, HISTORY_PREFIX};
