//! Schedule registry for JSON storage
//!
//! Persists registered recurring events to schedule.json and fires the ones
//! that are due.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SnapError, SnapResult};
use crate::storage::{read_json, write_json_atomic};

use super::{Period, ScheduledJob, TaskScheduler};

/// A registered recurring event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub event: String,
    pub period: Period,
    pub next_run: DateTime<Utc>,
}

/// What happened to a due event
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Completed,
    Failed(String),
    /// No job was supplied for the event; it was still rescheduled
    NoHandler,
}

/// One fired event
#[derive(Debug, Clone, PartialEq)]
pub struct DueRun {
    pub event: String,
    pub scheduled_for: DateTime<Utc>,
    pub next_run: DateTime<Utc>,
    pub outcome: JobOutcome,
}

/// Serializable schedule data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScheduleData {
    events: Vec<ScheduledEvent>,
}

/// File-backed [`TaskScheduler`]
pub struct ScheduleRegistry {
    path: PathBuf,
    events: RwLock<Vec<ScheduledEvent>>,
}

impl ScheduleRegistry {
    /// Create a new schedule registry
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            events: RwLock::new(Vec::new()),
        }
    }

    /// Create a registry and load it from disk
    pub fn open(path: PathBuf) -> SnapResult<Self> {
        let registry = Self::new(path);
        registry.load()?;
        Ok(registry)
    }

    /// Load events from disk
    pub fn load(&self) -> SnapResult<()> {
        let file_data: ScheduleData = read_json(&self.path)?;

        let mut events = self
            .events
            .write()
            .map_err(|e| SnapError::Schedule(format!("Failed to acquire write lock: {}", e)))?;
        *events = file_data.events;
        Ok(())
    }

    /// Save events to disk
    pub fn save(&self) -> SnapResult<()> {
        let events = self
            .events
            .read()
            .map_err(|e| SnapError::Schedule(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = ScheduleData {
            events: events.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All registered events
    pub fn events(&self) -> SnapResult<Vec<ScheduledEvent>> {
        let events = self
            .events
            .read()
            .map_err(|e| SnapError::Schedule(format!("Failed to acquire read lock: {}", e)))?;
        Ok(events.clone())
    }

    /// Look up a registered event by name
    pub fn get(&self, event: &str) -> SnapResult<Option<ScheduledEvent>> {
        Ok(self.events()?.into_iter().find(|e| e.event == event))
    }

    /// Fire every event due at `now` once and move it to its next slot
    ///
    /// A failing job is logged and recorded; it does not stop other events.
    pub fn run_due(
        &self,
        now: DateTime<Utc>,
        jobs: &[&dyn ScheduledJob],
    ) -> SnapResult<Vec<DueRun>> {
        let due: Vec<(usize, ScheduledEvent)> = self
            .events()?
            .into_iter()
            .enumerate()
            .filter(|(_, e)| e.next_run <= now)
            .collect();

        if due.is_empty() {
            debug!("no scheduled events due");
            return Ok(Vec::new());
        }

        let mut runs = Vec::with_capacity(due.len());
        for (index, event) in due {
            let outcome = match jobs.iter().find(|j| j.event_name() == event.event) {
                Some(job) => match job.run() {
                    Ok(()) => JobOutcome::Completed,
                    Err(e) => {
                        warn!(event = %event.event, error = %e, "scheduled job failed");
                        JobOutcome::Failed(e.to_string())
                    }
                },
                None => {
                    warn!(event = %event.event, "no handler for scheduled event");
                    JobOutcome::NoHandler
                }
            };

            let next_run = next_slot_after(event.next_run, event.period, now);
            {
                let mut events = self.events.write().map_err(|e| {
                    SnapError::Schedule(format!("Failed to acquire write lock: {}", e))
                })?;
                if let Some(stored) = events.get_mut(index) {
                    stored.next_run = next_run;
                }
            }

            runs.push(DueRun {
                event: event.event,
                scheduled_for: event.next_run,
                next_run,
                outcome,
            });
        }

        self.save()?;
        Ok(runs)
    }
}

impl TaskScheduler for ScheduleRegistry {
    fn is_registered(&self, event: &str) -> SnapResult<bool> {
        Ok(self.get(event)?.is_some())
    }

    fn register(&self, event: &str, start: DateTime<Utc>, period: Period) -> SnapResult<()> {
        {
            let mut events = self
                .events
                .write()
                .map_err(|e| SnapError::Schedule(format!("Failed to acquire write lock: {}", e)))?;
            events.push(ScheduledEvent {
                event: event.to_string(),
                period,
                next_run: start,
            });
        }
        self.save()
    }
}

/// First slot strictly after `now` on the grid `start + k * period`
fn next_slot_after(start: DateTime<Utc>, period: Period, now: DateTime<Utc>) -> DateTime<Utc> {
    let step = period.duration().num_seconds().max(1);
    let elapsed = (now - start).num_seconds().max(0);
    let steps = elapsed / step + 1;
    start + Duration::seconds(step * steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::timestamp_to_datetime;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct CountingJob {
        name: &'static str,
        runs: Cell<usize>,
        fail: bool,
    }

    impl CountingJob {
        fn new(name: &'static str, fail: bool) -> Self {
            Self {
                name,
                runs: Cell::new(0),
                fail,
            }
        }
    }

    impl ScheduledJob for CountingJob {
        fn event_name(&self) -> &str {
            self.name
        }

        fn run(&self) -> SnapResult<()> {
            self.runs.set(self.runs.get() + 1);
            if self.fail {
                Err(SnapError::Storage("disk full".into()))
            } else {
                Ok(())
            }
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        timestamp_to_datetime(secs).unwrap()
    }

    fn create_test_registry() -> (TempDir, ScheduleRegistry) {
        let temp_dir = TempDir::new().unwrap();
        let registry = ScheduleRegistry::open(temp_dir.path().join("schedule.json")).unwrap();
        (temp_dir, registry)
    }

    #[test]
    fn test_register_persists() {
        let (temp, registry) = create_test_registry();
        assert!(!registry.is_registered("backup").unwrap());

        registry.register("backup", at(1_000), Period::Daily).unwrap();
        assert!(registry.is_registered("backup").unwrap());

        let reopened = ScheduleRegistry::open(temp.path().join("schedule.json")).unwrap();
        let event = reopened.get("backup").unwrap().unwrap();
        assert_eq!(event.next_run, at(1_000));
        assert_eq!(event.period, Period::Daily);
    }

    #[test]
    fn test_run_due_fires_once_and_reschedules() {
        let (_temp, registry) = create_test_registry();
        registry.register("backup", at(0), Period::Daily).unwrap();
        let job = CountingJob::new("backup", false);

        // Three days late: one run, next slot stays on the daily grid
        let now = at(3 * 86_400 + 10);
        let runs = registry.run_due(now, &[&job]).unwrap();

        assert_eq!(job.runs.get(), 1);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].outcome, JobOutcome::Completed);
        assert_eq!(runs[0].next_run, at(4 * 86_400));

        assert!(registry.run_due(now, &[&job]).unwrap().is_empty());
        assert_eq!(job.runs.get(), 1);
    }

    #[test]
    fn test_not_yet_due() {
        let (_temp, registry) = create_test_registry();
        registry.register("backup", at(500), Period::Hourly).unwrap();
        let job = CountingJob::new("backup", false);

        assert!(registry.run_due(at(499), &[&job]).unwrap().is_empty());
        assert_eq!(job.runs.get(), 0);
    }

    #[test]
    fn test_failing_job_does_not_block_others() {
        let (_temp, registry) = create_test_registry();
        registry.register("broken", at(0), Period::Daily).unwrap();
        registry.register("backup", at(0), Period::Daily).unwrap();
        let broken = CountingJob::new("broken", true);
        let backup = CountingJob::new("backup", false);

        let runs = registry.run_due(at(10), &[&broken, &backup]).unwrap();

        assert_eq!(runs.len(), 2);
        assert!(matches!(runs[0].outcome, JobOutcome::Failed(_)));
        assert_eq!(runs[1].outcome, JobOutcome::Completed);
        assert_eq!(backup.runs.get(), 1);
        assert_eq!(registry.get("broken").unwrap().unwrap().next_run, at(86_400));
    }

    #[test]
    fn test_event_without_handler_is_rescheduled() {
        let (_temp, registry) = create_test_registry();
        registry.register("orphan", at(0), Period::Hourly).unwrap();

        let runs = registry.run_due(at(5), &[]).unwrap();
        assert_eq!(runs[0].outcome, JobOutcome::NoHandler);
        assert_eq!(registry.get("orphan").unwrap().unwrap().next_run, at(3_600));
    }

    #[test]
    fn test_next_slot_exactly_on_boundary() {
        assert_eq!(next_slot_after(at(0), Period::Daily, at(0)), at(86_400));
        assert_eq!(next_slot_after(at(0), Period::Daily, at(86_400)), at(172_800));
    }
}
