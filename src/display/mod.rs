//! Display formatting for terminal output
//!
//! Renders backup listings, snapshot values and restore comparisons in the
//! formats the CLI accepts.

pub mod backups;
pub mod value;

use clap::ValueEnum;

pub use backups::{format_backup_list, write_backup_list};
pub use value::{format_comparison, format_value};

/// Output formats for `list`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned table
    #[default]
    Table,
    /// JSON array of rows
    Json,
    /// CSV with a header line
    Csv,
    /// Number of rows only
    Count,
    /// YAML sequence of rows
    Yaml,
}

/// Output formats for `view`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ViewFormat {
    /// Strings as-is, everything else as indented JSON
    #[default]
    #[value(alias = "var_export")]
    Pretty,
    /// Compact JSON
    Json,
    /// YAML document
    Yaml,
}
