//! Snapshot value display

use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::SnapResult;
use crate::restore::RestorePlan;

use super::ViewFormat;

#[derive(Tabled)]
struct ComparisonRow {
    current_value: String,
    backup_value: String,
}

/// Format a snapshot value for `view`
pub fn format_value(value: &Value, format: ViewFormat) -> SnapResult<String> {
    let output = match format {
        ViewFormat::Pretty => pretty(value)?,
        ViewFormat::Json => serde_json::to_string(value)?,
        ViewFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
    };
    Ok(output)
}

/// Two-column table of the live value and the backup replacing it
pub fn format_comparison(plan: &RestorePlan) -> SnapResult<String> {
    let current_value = match &plan.current {
        Some(value) => pretty(value)?,
        None => "(not set)".to_string(),
    };

    let row = ComparisonRow {
        current_value,
        backup_value: pretty(&plan.backup)?,
    };

    let mut table = Table::new([row]);
    table.with(Style::psql());
    Ok(table.to_string())
}

fn pretty(value: &Value) -> SnapResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string_pretty(other)?),
    }
}
