//! Audit logging system for optsnap
//!
//! Records every capture and every performed restore in an append-only
//! audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: one log record with timestamp, operation, option name,
//!   time key and optional before/after values.
//! - `AuditLogger`: writes entries to the audit log file using a
//!   line-delimited JSON format (JSONL).
//! - `generate_diff`: creates human-readable diffs between option values.
//!
//! # Example
//!
//! ```rust,ignore
//! use optsnap::audit::{AuditEntry, AuditLogger};
//! use serde_json::json;
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(&AuditEntry::restore(clock.now(), "siteurl", 1700000000, Some(&json!("x")), &json!("b")))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
