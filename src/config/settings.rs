//! User settings for optsnap
//!
//! Holds the tracked option names and the snapshot retention policy. Settings
//! are read once at startup and handed to every component by reference.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::paths::OptsnapPaths;
use crate::error::SnapError;

/// How many snapshots are kept per option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRetention {
    /// Maximum number of retained snapshots per option
    pub count: usize,
}

impl Default for SnapshotRetention {
    fn default() -> Self {
        Self { count: 3 }
    }
}

/// User settings for optsnap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Option names captured on every backup cycle, in listing order
    #[serde(default = "default_tracked_options")]
    pub tracked_options: Vec<String>,

    /// Snapshot retention policy
    #[serde(default)]
    pub retention: SnapshotRetention,
}

fn default_schema_version() -> u32 {
    1
}

fn default_tracked_options() -> Vec<String> {
    vec!["siteurl".to_string(), "sidebars_widgets".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            tracked_options: default_tracked_options(),
            retention: SnapshotRetention::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &OptsnapPaths) -> Result<Self, SnapError> {
        let settings_path = paths.settings_file();

        let settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SnapError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents)
                .map_err(|e| SnapError::Config(format!("Failed to parse settings file: {}", e)))?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &OptsnapPaths) -> Result<(), SnapError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SnapError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SnapError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Replace the tracked option list, keeping everything else
    pub fn with_tracked_options(mut self, names: Vec<String>) -> Result<Self, SnapError> {
        self.tracked_options = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .collect();
        self.validate()?;
        Ok(self)
    }

    /// Check the settings for values no component can work with
    pub fn validate(&self) -> Result<(), SnapError> {
        if self.retention.count == 0 {
            return Err(SnapError::Config(
                "Retention count must be at least 1".into(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.tracked_options {
            if name.trim().is_empty() {
                return Err(SnapError::Config("Tracked option names cannot be empty".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(SnapError::Config(format!(
                    "Option '{}' is tracked more than once",
                    name
                )));
            }
        }

        Ok(())
    }
}
