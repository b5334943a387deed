//! In-memory option store for embedding and tests

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{SnapError, SnapResult};

use super::{Autoload, KeyValueStore};

/// Key-value store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, (Value, Autoload)>>,
    writes: RwLock<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls seen so far
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|w| *w).unwrap_or(0)
    }

    /// Autoload hint of a stored key
    pub fn autoload(&self, key: &str) -> Option<Autoload> {
        self.data
            .read()
            .ok()
            .and_then(|data| data.get(key).map(|(_, a)| *a))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SnapResult<Option<Value>> {
        let data = self
            .data
            .read()
            .map_err(|e| SnapError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(key).map(|(v, _)| v.clone()))
    }

    fn set(&self, key: &str, value: Value, autoload: Autoload) -> SnapResult<()> {
        self.write(key, value, Some(autoload))
    }

    fn update(&self, key: &str, value: Value) -> SnapResult<()> {
        self.write(key, value, None)
    }
}

impl MemoryStore {
    fn write(&self, key: &str, value: Value, autoload: Option<Autoload>) -> SnapResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SnapError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let autoload = autoload
            .or_else(|| data.get(key).map(|(_, a)| *a))
            .unwrap_or_default();
        data.insert(key.to_string(), (value, autoload));

        let mut writes = self
            .writes
            .write()
            .map_err(|e| SnapError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *writes += 1;
        Ok(())
    }
}
