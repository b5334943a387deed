//! Bounded, insertion-ordered snapshot log for one option
//!
//! Stored in the option store as a JSON object whose keys are capture
//! timestamps (decimal strings) in insertion order.

use serde_json::{Map, Value};

use crate::error::{SnapError, SnapResult};

use super::key::SnapshotKey;

/// One captured value
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Capture time, seconds since the unix epoch
    pub time_key: i64,
    pub value: Value,
}

/// Ordered capture-time -> value mapping
///
/// Insertion order is authoritative: it decides which entry is "latest" and
/// which entries are evicted, regardless of the numeric key values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotHistory {
    entries: Vec<Snapshot>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a history from its stored form
    ///
    /// An empty array or `null` decodes to an empty history.
    pub fn from_value(option: &str, value: Value) -> SnapResult<Self> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::new()),
            Value::Array(items) if items.is_empty() => return Ok(Self::new()),
            other => {
                return Err(SnapError::Storage(format!(
                    "Backup history for '{}' is not an object: {}",
                    option, other
                )))
            }
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let time_key = key.parse::<i64>().map_err(|_| {
                SnapError::Storage(format!(
                    "Backup history for '{}' has a non-numeric time key '{}'",
                    option, key
                ))
            })?;
            entries.push(Snapshot { time_key, value });
        }

        Ok(Self { entries })
    }

    /// Encode to the stored form, keeping insertion order
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|s| (s.time_key.to_string(), s.value.clone()))
            .collect();
        Value::Object(map)
    }

    /// Append a snapshot; an existing key is overwritten in place
    pub fn push(&mut self, time_key: i64, value: Value) {
        match self.entries.iter_mut().find(|s| s.time_key == time_key) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Snapshot { time_key, value }),
        }
    }

    /// Keep only the last `limit` entries; returns the evicted keys, oldest first
    pub fn trim_to(&mut self, limit: usize) -> Vec<i64> {
        let excess = self.entries.len().saturating_sub(limit);
        self.entries
            .drain(..excess)
            .map(|s| s.time_key)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time keys in insertion order
    pub fn time_keys(&self) -> Vec<i64> {
        self.entries.iter().map(|s| s.time_key).collect()
    }

    /// The most recently inserted snapshot
    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    pub fn get(&self, time_key: i64) -> Option<&Snapshot> {
        self.entries.iter().find(|s| s.time_key == time_key)
    }

    pub fn resolve(&self, key: &SnapshotKey) -> Option<&Snapshot> {
        match key {
            SnapshotKey::Latest => self.latest(),
            SnapshotKey::Exact(time_key) => self.get(*time_key),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}
