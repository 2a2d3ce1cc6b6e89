//! Per-resource-type counters
//!
//! For every [`ObjectTypeKey`] the run tracks how many records were seen,
//! what the loader did with them and how many warnings/errors were logged
//! against the type. `counted` increments exactly once per record the parser
//! attempts; `created`, `updated` and `errored` are mutually exclusive
//! outcomes recorded later.

use crate::domain::{LogLevel, ObjectTypeKey};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counter block for a single resource type
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeCounterData {
    pub created: u32,
    pub updated: u32,
    pub errored: u32,
    pub counted: u32,
    pub issues: BTreeMap<LogLevel, u32>,
}

/// Nested counter structure over all resource types
#[derive(Debug, Default)]
pub struct TypeCounter {
    data: BTreeMap<ObjectTypeKey, TypeCounterData>,
}

impl TypeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_counted(&mut self, key: ObjectTypeKey) {
        self.data.entry(key).or_default().counted += 1;
    }

    pub fn increment_created(&mut self, key: ObjectTypeKey) {
        self.data.entry(key).or_default().created += 1;
    }

    pub fn increment_updated(&mut self, key: ObjectTypeKey) {
        self.data.entry(key).or_default().updated += 1;
    }

    pub fn increment_errored(&mut self, key: ObjectTypeKey) {
        self.data.entry(key).or_default().errored += 1;
    }

    /// Count a warning/error logged against a type; the session is the only
    /// caller, keeping the issue bookkeeping auditable in one place.
    pub fn increment_issue(&mut self, key: ObjectTypeKey, level: LogLevel) {
        *self
            .data
            .entry(key)
            .or_default()
            .issues
            .entry(level)
            .or_default() += 1;
    }

    pub fn get(&self, key: ObjectTypeKey) -> Option<&TypeCounterData> {
        self.data.get(&key)
    }

    /// Serializable snapshot of the current counter state
    pub fn snapshot(&self) -> Statistics {
        Statistics {
            data: self.data.clone(),
        }
    }
}

/// The persisted statistics shape: resource-type key to counter block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub data: BTreeMap<ObjectTypeKey, TypeCounterData>,
}

impl Statistics {
    /// Counter block for a key, defaulting to all-zero for absent types
    pub fn get(&self, key: ObjectTypeKey) -> TypeCounterData {
        self.data.get(&key).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counter_increments() {
        let mut counter = TypeCounter::new();
        counter.increment_updated(ObjectTypeKey::Roltypen);
        counter.increment_created(ObjectTypeKey::Roltypen);
        counter.increment_counted(ObjectTypeKey::Roltypen);
        counter.increment_errored(ObjectTypeKey::Roltypen);

        let data = counter.get(ObjectTypeKey::Roltypen).unwrap();
        assert_eq!(data.created, 1);
        assert_eq!(data.updated, 1);
        assert_eq!(data.errored, 1);
        assert_eq!(data.counted, 1);
        assert!(data.issues.is_empty());
    }

    #[test]
    fn test_issue_counts_per_level() {
        let mut counter = TypeCounter::new();
        counter.increment_issue(ObjectTypeKey::Statustypen, LogLevel::Info);
        counter.increment_issue(ObjectTypeKey::Statustypen, LogLevel::Warning);
        counter.increment_issue(ObjectTypeKey::Statustypen, LogLevel::Error);
        counter.increment_issue(ObjectTypeKey::Statustypen, LogLevel::Error);

        let data = counter.get(ObjectTypeKey::Statustypen).unwrap();
        assert_eq!(data.issues.get(&LogLevel::Info), Some(&1));
        assert_eq!(data.issues.get(&LogLevel::Warning), Some(&1));
        assert_eq!(data.issues.get(&LogLevel::Error), Some(&2));
    }

    #[test]
    fn test_snapshot_serialized_shape() {
        let mut counter = TypeCounter::new();
        counter.increment_counted(ObjectTypeKey::Zaaktypen);
        counter.increment_created(ObjectTypeKey::Zaaktypen);
        counter.increment_issue(ObjectTypeKey::Zaaktypen, LogLevel::Warning);

        let value = serde_json::to_value(counter.snapshot()).unwrap();
        assert_eq!(
            value,
            json!({
                "data": {
                    "zt": {
                        "created": 1,
                        "updated": 0,
                        "errored": 0,
                        "counted": 1,
                        "issues": {"warning": 1},
                    }
                }
            })
        );
    }

    #[test]
    fn test_statistics_get_defaults_missing_types() {
        let stats = Statistics::default();
        assert_eq!(stats.get(ObjectTypeKey::Roltypen), TypeCounterData::default());
    }
}
