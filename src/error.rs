//! Custom error types for optsnap
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for optsnap operations
#[derive(Error, Debug)]
pub enum SnapError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid input that is present but malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required argument was not supplied
    #[error("{0}")]
    Usage(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Output rendering errors
    #[error("Export error: {0}")]
    Export(String),

    /// Scheduler registry errors
    #[error("Schedule error: {0}")]
    Schedule(String),
}

impl SnapError {
    /// No snapshot history exists for an option
    pub fn history_not_found(option: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup history",
            identifier: option.into(),
        }
    }

    /// A time key is absent from an option's history
    pub fn backup_not_found(time_key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: time_key.into(),
        }
    }

    /// The option name argument was omitted
    pub fn missing_option_name() -> Self {
        Self::Usage("Option name not specified.".into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

impl From<std::io::Error> for SnapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SnapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for SnapError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for SnapError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for optsnap operations
pub type SnapResult<T> = Result<T, SnapError>;
