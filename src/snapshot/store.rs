//! Snapshot store
//!
//! Reads live option values and appends them to each option's bounded
//! snapshot history, which lives in the same key-value store under a
//! prefixed key.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::clock::Clock;
use crate::config::Settings;
use crate::error::{SnapError, SnapResult};
use crate::storage::{Autoload, KeyValueStore};

use super::history::{Snapshot, SnapshotHistory};
use super::key::SnapshotKey;

/// Namespace prepended to an option name to form its history key
pub const HISTORY_PREFIX: &str = "optsnap_backup_";

/// Key under which an option's snapshot history is stored
pub fn history_key(option: &str) -> String {
    format!("{}{}", HISTORY_PREFIX, option)
}

/// Result of a capture attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureResult {
    /// The option has no live value; history left untouched
    Skipped,
    /// A snapshot was written
    Captured {
        time_key: i64,
        /// Keys dropped by retention, oldest first
        evicted: Vec<i64>,
    },
}

/// Whether an option has a history and which keys it holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotListing {
    pub exists: bool,
    pub time_keys: Vec<i64>,
}

/// Capture and lookup of option snapshots
pub struct SnapshotStore<'a> {
    store: &'a dyn KeyValueStore,
    clock: &'a dyn Clock,
    retention: usize,
    audit: Option<&'a AuditLogger>,
}

impl<'a> SnapshotStore<'a> {
    /// Create a snapshot store using the retention count from `settings`
    pub fn new(store: &'a dyn KeyValueStore, clock: &'a dyn Clock, settings: &Settings) -> Self {
        Self {
            store,
            clock,
            retention: settings.retention.count.max(1),
            audit: None,
        }
    }

    /// Record captures in an audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock
    }

    /// Current live value of an option
    pub fn live_value(&self, option: &str) -> SnapResult<Option<Value>> {
        self.store.get(option)
    }

    /// Overwrite the live value of an option, keeping its autoload hint
    pub fn set_live_value(&self, option: &str, value: Value) -> SnapResult<()> {
        self.store.update(option, value)
    }

    /// Append an entry to the audit log, if one is attached
    ///
    /// Called after the store write has landed, so a failure here is only
    /// logged and never turns a completed operation into an error.
    pub fn record_audit(&self, entry: &AuditEntry) {
        if let Some(audit) = self.audit {
            if let Err(e) = audit.log(entry) {
                warn!(
                    option = %entry.option_name,
                    operation = %entry.operation,
                    error = %e,
                    "failed to write audit entry"
                );
            }
        }
    }

    /// Stored history for an option, `None` if it was never captured
    pub fn history(&self, option: &str) -> SnapResult<Option<SnapshotHistory>> {
        match self.store.get(&history_key(option))? {
            Some(value) => SnapshotHistory::from_value(option, value).map(Some),
            None => Ok(None),
        }
    }

    /// Append the current live value to the option's history and trim it
    pub fn capture(&self, option: &str) -> SnapResult<CaptureResult> {
        let current = match self.live_value(option)? {
            Some(value) => value,
            None => {
                debug!(option, "no live value, skipping capture");
                return Ok(CaptureResult::Skipped);
            }
        };

        let mut history = self.history(option)?.unwrap_or_default();
        let now = self.clock.now();
        let time_key = now.timestamp();

        history.push(time_key, current.clone());
        let evicted = history.trim_to(self.retention);

        self.store
            .set(&history_key(option), history.to_value(), Autoload::No)?;

        info!(option, time_key, evicted = evicted.len(), "captured snapshot");

        self.record_audit(&AuditEntry::capture(now, option, time_key, &current, &evicted));

        Ok(CaptureResult::Captured { time_key, evicted })
    }

    /// Time keys held for an option, in insertion order
    pub fn list_snapshots(&self, option: &str) -> SnapResult<SnapshotListing> {
        Ok(match self.history(option)? {
            Some(history) => SnapshotListing {
                exists: true,
                time_keys: history.time_keys(),
            },
            None => SnapshotListing {
                exists: false,
                time_keys: Vec::new(),
            },
        })
    }

    /// Resolve one snapshot of an option
    pub fn get_snapshot(&self, option: &str, key: &SnapshotKey) -> SnapResult<Snapshot> {
        let history = self
            .history(option)?
            .ok_or_else(|| SnapError::history_not_found(option))?;

        history
            .resolve(key)
            .cloned()
            .ok_or_else(|| SnapError::backup_not_found(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStore;
    use chrono::Duration;
    use serde_json::json;

    const T1: i64 = 1_700_000_000;

    fn capture_sequence(
        snapshots: &SnapshotStore,
        store: &MemoryStore,
        clock: &ManualClock,
        values: &[&str],
    ) {
        for value in values {
            store.set("siteurl", json!(value), Autoload::Yes).unwrap();
            snapshots.capture("siteurl").unwrap();
            clock.advance(Duration::seconds(60));
        }
    }

    #[test]
    fn test_four_captures_evict_the_first() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings);

        capture_sequence(&snapshots, &store, &clock, &["a", "b", "c"]);
        let history = snapshots.history("siteurl").unwrap().unwrap();
        assert_eq!(history.time_keys(), vec![T1, T1 + 60, T1 + 120]);

        store.set("siteurl", json!("d"), Autoload::Yes).unwrap();
        let result = snapshots.capture("siteurl").unwrap();
        assert_eq!(
            result,
            CaptureResult::Captured {
                time_key: T1 + 180,
                evicted: vec![T1],
            }
        );

        let history = snapshots.history("siteurl").unwrap().unwrap();
        let values: Vec<_> = history.iter().map(|s| s.value.clone()).collect();
        assert_eq!(history.time_keys(), vec![T1 + 60, T1 + 120, T1 + 180]);
        assert_eq!(values, vec![json!("b"), json!("c"), json!("d")]);
    }

    #[test]
    fn test_history_never_exceeds_retention() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings);

        for k in 0..8 {
            let values: Vec<String> = vec![format!("v{}", k)];
            let refs: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
            capture_sequence(&snapshots, &store, &clock, &refs);

            let len = snapshots.history("siteurl").unwrap().unwrap().len();
            assert_eq!(len, (k + 1).min(3));
        }

        let latest = snapshots.get_snapshot("siteurl", &SnapshotKey::Latest).unwrap();
        assert_eq!(latest.value, json!("v7"));
    }

    #[test]
    fn test_capture_without_live_value_leaves_history() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings);

        assert_eq!(snapshots.capture("siteurl").unwrap(), CaptureResult::Skipped);
        assert!(snapshots.history("siteurl").unwrap().is_none());
        assert_eq!(store.write_count(), 0);

        let existing = json!({ "100": "old" });
        store
            .set(&history_key("blogname"), existing.clone(), Autoload::No)
            .unwrap();
        assert_eq!(snapshots.capture("blogname").unwrap(), CaptureResult::Skipped);
        assert_eq!(store.get(&history_key("blogname")).unwrap(), Some(existing));
    }

    #[test]
    fn test_history_written_without_autoload() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings);

        capture_sequence(&snapshots, &store, &clock, &["a"]);
        assert_eq!(store.autoload(&history_key("siteurl")), Some(Autoload::No));
    }

    #[test]
    fn test_same_second_capture_overwrites() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings);

        store.set("siteurl", json!("a"), Autoload::Yes).unwrap();
        snapshots.capture("siteurl").unwrap();
        store.set("siteurl", json!("b"), Autoload::Yes).unwrap();
        snapshots.capture("siteurl").unwrap();

        let history = snapshots.history("siteurl").unwrap().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(T1).unwrap().value, json!("b"));
    }

    #[test]
    fn test_list_snapshots() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings);

        let listing = snapshots.list_snapshots("siteurl").unwrap();
        assert!(!listing.exists);
        assert!(listing.time_keys.is_empty());

        capture_sequence(&snapshots, &store, &clock, &["a", "b"]);
        let listing = snapshots.list_snapshots("siteurl").unwrap();
        assert!(listing.exists);
        assert_eq!(listing.time_keys, vec![T1, T1 + 60]);
    }

    #[test]
    fn test_get_snapshot_lookups() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings);

        assert!(snapshots
            .get_snapshot("siteurl", &SnapshotKey::Latest)
            .unwrap_err()
            .is_not_found());

        capture_sequence(&snapshots, &store, &clock, &["a", "b", "c", "d"]);

        let t2 = T1 + 60;
        assert_eq!(
            snapshots.get_snapshot("siteurl", &SnapshotKey::Latest).unwrap().value,
            json!("d")
        );
        assert_eq!(
            snapshots.get_snapshot("siteurl", &SnapshotKey::Exact(t2)).unwrap().value,
            json!("b")
        );
        assert!(snapshots
            .get_snapshot("siteurl", &SnapshotKey::Exact(999))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_latest_uses_stored_order() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings);

        let mut map = serde_json::Map::new();
        map.insert("900".into(), json!("numerically-newest"));
        map.insert("100".into(), json!("inserted-last"));
        store
            .set(&history_key("siteurl"), Value::Object(map), Autoload::No)
            .unwrap();

        let latest = snapshots.get_snapshot("siteurl", &SnapshotKey::Latest).unwrap();
        assert_eq!(latest.time_key, 100);
    }

    #[test]
    fn test_capture_is_audited() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let mut settings = Settings::default();
        settings.retention.count = 1;
        let snapshots = SnapshotStore::new(&store, &clock, &settings).with_audit(&audit);

        capture_sequence(&snapshots, &store, &clock, &["a", "b"]);

        let entries = audit.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].timestamp.timestamp(), T1);
        assert_eq!(entries[1].timestamp.timestamp(), T1 + 60);
        assert_eq!(entries[1].diff_summary.as_deref(), Some("evicted: 1700000000"));
    }

    #[test]
    fn test_unwritable_audit_log_does_not_fail_capture() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let audit = AuditLogger::new(temp_dir.path().to_path_buf());
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings).with_audit(&audit);

        store.set("siteurl", json!("a"), Autoload::Yes).unwrap();
        let result = snapshots.capture("siteurl").unwrap();

        assert_eq!(
            result,
            CaptureResult::Captured {
                time_key: T1,
                evicted: vec![],
            }
        );
        assert_eq!(
            store.get(&history_key("siteurl")).unwrap(),
            Some(json!({ "1700000000": "a" }))
        );
    }

    #[test]
    fn test_set_live_value_keeps_autoload_hint() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_timestamp(T1);
        let settings = Settings::default();
        let snapshots = SnapshotStore::new(&store, &clock, &settings);

        store.set("sidebars_widgets", json!({}), Autoload::No).unwrap();
        snapshots
            .set_live_value("sidebars_widgets", json!({"a": 1}))
            .unwrap();
        assert_eq!(store.autoload("sidebars_widgets"), Some(Autoload::No));

        snapshots.set_live_value("blogname", json!("Blog")).unwrap();
        assert_eq!(store.autoload("blogname"), Some(Autoload::Yes));
    }
}
