//! Configuration module for optsnap
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Tracked option names and retention settings

pub mod paths;
pub mod settings;

pub use paths::OptsnapPaths;
pub use settings::{Settings, SnapshotRetention};
