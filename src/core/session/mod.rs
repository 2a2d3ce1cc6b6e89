//! Import session: log, counters and the persistence contract
//!
//! The session travels through the parser and the loader and collects
//! everything a run produces: the ordered leveled log and the per-type
//! counters. Nothing else in the core holds run state.
//!
//! Counting happens in exactly two places: the explicit counter methods
//! (`increment_counted` and friends) and [`ImportSession::log`], which turns
//! tagged warning/error entries into issue counts.

pub mod counter;
pub mod format;

use crate::domain::{LogLevel, ObjectTypeKey};
use chrono::NaiveDate;
use counter::{Statistics, TypeCounter};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// One entry of the run's ordered log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Parameters of a single run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Selectielijst year to resolve process types against
    pub year: u16,

    /// Validity start for every created resource
    pub start_date: NaiveDate,

    /// Whether an existing published resource is closed when a new version
    /// is created
    pub close_published: bool,

    /// Absolute URL of the target catalog
    pub catalog_url: String,
}

/// Terminal status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run went through; issues (if any) are in the log
    Completed,

    /// A fatal error stopped the run; remote mutations already issued stay
    Aborted,
}

/// Persistence collaborator for job metadata
///
/// The core does not persist anything itself; the embedding application
/// decides where mirrored log entries and statistics snapshots go.
pub trait JobStore: Send + Sync {
    fn add_log(&self, level: LogLevel, message: &str);
    fn set_statistics(&self, statistics: &Statistics);
}

/// A store that discards everything
pub struct NullJobStore;

impl JobStore for NullJobStore {
    fn add_log(&self, _level: LogLevel, _message: &str) {}
    fn set_statistics(&self, _statistics: &Statistics) {}
}

/// A store that keeps everything in memory, for embedders and tests
#[derive(Default)]
pub struct MemoryJobStore {
    logs: Mutex<Vec<LogEntry>>,
    statistics: Mutex<Option<Statistics>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.logs.lock().expect("store lock poisoned").clone()
    }

    pub fn statistics(&self) -> Option<Statistics> {
        self.statistics
            .lock()
            .expect("store lock poisoned")
            .clone()
    }
}

impl JobStore for MemoryJobStore {
    fn add_log(&self, level: LogLevel, message: &str) {
        self.logs.lock().expect("store lock poisoned").push(LogEntry {
            level,
            message: message.to_string(),
        });
    }

    fn set_statistics(&self, statistics: &Statistics) {
        *self.statistics.lock().expect("store lock poisoned") = Some(statistics.clone());
    }
}

/// Holds logs and statistics during parsing and loading
pub struct ImportSession {
    options: ImportOptions,
    logs: Vec<LogEntry>,
    counter: TypeCounter,
    store: Arc<dyn JobStore>,
    save_logs: bool,
    outcome: RunOutcome,
}

impl ImportSession {
    /// Create a session; with `save_logs` every entry is mirrored to the
    /// store as it is appended (import runs), without it only statistics
    /// flushes reach the store (precheck runs).
    pub fn new(options: ImportOptions, store: Arc<dyn JobStore>, save_logs: bool) -> Self {
        Self {
            options,
            logs: Vec::new(),
            counter: TypeCounter::new(),
            store,
            save_logs,
            outcome: RunOutcome::Completed,
        }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn counter(&self) -> &TypeCounter {
        &self.counter
    }

    pub fn counter_mut(&mut self) -> &mut TypeCounter {
        &mut self.counter
    }

    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    pub fn mark_aborted(&mut self) {
        self.outcome = RunOutcome::Aborted;
    }

    /// Append a log entry
    ///
    /// Tagged warning/error entries also count an issue against the type.
    /// This is the single place issue counters mutate.
    pub fn log(&mut self, level: LogLevel, message: String, type_key: Option<ObjectTypeKey>) {
        match level {
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warning => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }

        if let Some(key) = type_key {
            if matches!(level, LogLevel::Warning | LogLevel::Error) {
                self.counter.increment_issue(key, level);
            }
        }

        if self.save_logs {
            self.store.add_log(level, &message);
        }
        self.logs.push(LogEntry { level, message });
    }

    pub fn log_info(&mut self, message: impl Into<String>, type_key: Option<ObjectTypeKey>) {
        // info entries are never counted as issues; the type key parameter
        // is kept for uniformity with the other levels
        self.log(LogLevel::Info, message.into(), type_key);
    }

    pub fn log_warning(&mut self, message: impl Into<String>, type_key: Option<ObjectTypeKey>) {
        self.log(LogLevel::Warning, message.into(), type_key);
    }

    pub fn log_error(&mut self, message: impl Into<String>, type_key: Option<ObjectTypeKey>) {
        self.log(LogLevel::Error, message.into(), type_key);
    }

    /// Push the current counter state to the store
    ///
    /// Safe to call repeatedly; always reflects the in-memory state.
    pub fn flush_counts(&self) {
        self.store.set_statistics(&self.counter.snapshot());
    }
}
