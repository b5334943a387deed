//! Option repository for JSON storage
//!
//! Manages loading and saving live option values to options.json

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{SnapError, SnapResult};

use super::file_io::{read_json, write_json_atomic};
use super::{Autoload, KeyValueStore};

/// A stored option value with its autoload hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub value: Value,
    #[serde(default)]
    pub autoload: Autoload,
}

/// Serializable option data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct OptionData {
    options: BTreeMap<String, OptionRecord>,
}

/// File-backed option store; every write is merged into the file on disk
pub struct JsonOptionStore {
    path: PathBuf,
    data: RwLock<HashMap<String, OptionRecord>>,
}

impl JsonOptionStore {
    /// Create a new option store
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store and load its contents from disk
    pub fn open(path: PathBuf) -> SnapResult<Self> {
        let store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Load options from disk
    pub fn load(&self) -> SnapResult<()> {
        let file_data: OptionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SnapError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        data.extend(file_data.options);

        debug!(path = %self.path.display(), count = data.len(), "loaded option store");
        Ok(())
    }

    /// Save options to disk
    pub fn save(&self) -> SnapResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| SnapError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = OptionData {
            options: data.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the full record for a key
    pub fn record(&self, key: &str) -> SnapResult<Option<OptionRecord>> {
        let data = self
            .data
            .read()
            .map_err(|e| SnapError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(key).cloned())
    }

    /// Number of stored options
    pub fn count(&self) -> SnapResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| SnapError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

impl KeyValueStore for JsonOptionStore {
    fn get(&self, key: &str) -> SnapResult<Option<Value>> {
        Ok(self.record(key)?.map(|r| r.value))
    }

    fn set(&self, key: &str, value: Value, autoload: Autoload) -> SnapResult<()> {
        self.write_record(key, value, Some(autoload))
    }

    fn update(&self, key: &str, value: Value) -> SnapResult<()> {
        self.write_record(key, value, None)
    }
}

impl JsonOptionStore {
    /// Merge one record into the file as it is on disk now
    ///
    /// Other keys are taken from disk rather than from this handle's copy,
    /// so writes made by other processes since `open` are kept.
    fn write_record(&self, key: &str, value: Value, autoload: Option<Autoload>) -> SnapResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SnapError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let on_disk: OptionData = read_json(&self.path)?;
        data.clear();
        data.extend(on_disk.options);

        let autoload = autoload
            .or_else(|| data.get(key).map(|r| r.autoload))
            .unwrap_or_default();
        data.insert(key.to_string(), OptionRecord { value, autoload });

        let file_data = OptionData {
            options: data.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        };
        write_json_atomic(&self.path, &file_data)?;

        debug!(key, "wrote option");
        Ok(())
    }
}
