//! Audit entry data structures
//!
//! Defines the operation types and the format of a single audit log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A live value was appended to its snapshot history
    Capture,
    /// A snapshot was written back as the live value
    Restore,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Capture => write!(f, "CAPTURE"),
            Operation::Restore => write!(f, "RESTORE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Option the operation touched
    pub option_name: String,

    /// Snapshot time key written or restored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_key: Option<i64>,

    /// Live value before a restore
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    /// Captured value, or the live value after a restore
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Human-readable change summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for a capture at `at`; `evicted` lists time keys dropped by retention
    pub fn capture(
        at: DateTime<Utc>,
        option_name: impl Into<String>,
        time_key: i64,
        value: &Value,
        evicted: &[i64],
    ) -> Self {
        let diff_summary = if evicted.is_empty() {
            None
        } else {
            let keys: Vec<String> = evicted.iter().map(|k| k.to_string()).collect();
            Some(format!("evicted: {}", keys.join(", ")))
        };

        Self {
            timestamp: at,
            operation: Operation::Capture,
            option_name: option_name.into(),
            time_key: Some(time_key),
            before: None,
            after: Some(value.clone()),
            diff_summary,
        }
    }

    /// Entry for a restore from `time_key` performed at `at`
    pub fn restore(
        at: DateTime<Utc>,
        option_name: impl Into<String>,
        time_key: i64,
        before: Option<&Value>,
        after: &Value,
    ) -> Self {
        let diff_summary = generate_diff(before.unwrap_or(&Value::Null), after);

        Self {
            timestamp: at,
            operation: Operation::Restore,
            option_name: option_name.into(),
            time_key: Some(time_key),
            before: before.cloned(),
            after: Some(after.clone()),
            diff_summary,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.option_name
        );

        if let Some(key) = self.time_key {
            output.push_str(&format!(" @{}", key));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
