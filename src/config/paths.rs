//! Path management for optsnap
//!
//! Resolves where settings, the option store, the schedule registry and the
//! audit log live.
//!
//! ## Path Resolution Order
//!
//! 1. `OPTSNAP_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `optsnap`
//!    (`~/.config/optsnap` on Linux)

use std::path::PathBuf;

use crate::error::SnapError;

/// Manages all paths used by optsnap
#[derive(Debug, Clone)]
pub struct OptsnapPaths {
    /// Base directory for all optsnap data
    base_dir: PathBuf,
}

impl OptsnapPaths {
    /// Create a new OptsnapPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and
    /// `OPTSNAP_DATA_DIR` is unset.
    pub fn new() -> Result<Self, SnapError> {
        let base_dir = if let Ok(custom) = std::env::var("OPTSNAP_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create OptsnapPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the live option store
    pub fn options_file(&self) -> PathBuf {
        self.data_dir().join("options.json")
    }

    /// Get the path to the scheduled event registry
    pub fn schedule_file(&self) -> PathBuf {
        self.data_dir().join("schedule.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), SnapError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SnapError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SnapError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SnapError> {
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| SnapError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("optsnap"))
}
