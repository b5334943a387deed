//! Storage layer for optsnap
//!
//! The live option values and the snapshot histories both sit in a plain
//! key-value store. Components only see the [`KeyValueStore`] trait; the
//! binary wires in the JSON file implementation and tests use the in-memory one.

pub mod file_io;
pub mod memory;
pub mod options;

pub use file_io::{read_json, write_json_atomic};
pub use memory::MemoryStore;
pub use options::JsonOptionStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SnapResult;

/// Whether a value should be preloaded by the host on startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Autoload {
    #[default]
    Yes,
    No,
}

/// Single-key get/set access to the host option store
pub trait KeyValueStore {
    /// Read a value, `None` if the key has never been set
    fn get(&self, key: &str) -> SnapResult<Option<Value>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: Value, autoload: Autoload) -> SnapResult<()>;

    /// Replace a value but keep the key's autoload hint; new keys get the default
    fn update(&self, key: &str, value: Value) -> SnapResult<()>;
}
