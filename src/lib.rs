//! optsnap - Scheduled snapshots and restore for key-value options
//!
//! This library provides the core functionality for optsnap. For a fixed set
//! of option names it periodically captures each live value, keeps a bounded
//! history of snapshots per name, and offers tooling to list, inspect and
//! restore earlier snapshots.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `clock`: Wall-clock abstraction for capture timestamps
//! - `storage`: Key-value store trait with JSON file and in-memory backends
//! - `snapshot`: Snapshot history and retention
//! - `scheduler`: Recurring backup registration and triggering
//! - `restore`: List, view, restore and on-demand backup logic
//! - `audit`: Audit logging system
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use optsnap::clock::SystemClock;
//! use optsnap::config::{OptsnapPaths, Settings};
//! use optsnap::snapshot::SnapshotStore;
//! use optsnap::storage::JsonOptionStore;
//!
//! let paths = OptsnapPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = JsonOptionStore::open(paths.options_file())?;
//! let snapshots = SnapshotStore::new(&store, &SystemClock, &settings);
//! snapshots.capture("siteurl")?;
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod restore;
pub mod scheduler;
pub mod snapshot;
pub mod storage;

pub use error::SnapError;
