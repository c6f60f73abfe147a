//! Backup data snapshot
//!
//! `BackupData` is a value captured from the store: it is never a live view.
//! It is the plaintext that gets encrypted, and also the body of a plain
//! backup file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use super::{Setting, Task, Todo};
use crate::error::{SquirrelError, SquirrelResult};

/// Complete snapshot of settings, tasks and todos
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BackupData {
    /// Settings, unique by id
    pub settings: Vec<Setting>,

    /// Tasks, unique by id
    pub tasks: Vec<Task>,

    /// Todos, unique by id
    pub todos: Vec<Todo>,

    /// Unknown top-level fields, kept for forward compatibility
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackupData {
    /// Create a snapshot from the three collections
    pub fn new(settings: Vec<Setting>, tasks: Vec<Task>, todos: Vec<Todo>) -> Self {
        Self {
            settings,
            tasks,
            todos,
            extra: serde_json::Map::new(),
        }
    }

    /// Check if all three collections are empty
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty() && self.tasks.is_empty() && self.todos.is_empty()
    }

    /// Total number of records
    pub fn record_count(&self) -> usize {
        self.settings.len() + self.tasks.len() + self.todos.len()
    }

    /// Check that ids are unique within each collection
    pub fn validate(&self) -> SquirrelResult<()> {
        ensure_unique("Setting", self.settings.iter().map(|s| s.id.as_str()))?;
        ensure_unique("Task", self.tasks.iter().map(|t| t.id))?;
        ensure_unique("Todo", self.todos.iter().map(|t| t.id))?;
        Ok(())
    }
}

fn ensure_unique<K, I>(entity_type: &'static str, ids: I) -> SquirrelResult<()>
where
    K: Eq + Hash + Display,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::new();
    for id in ids {
        let identifier = id.to_string();
        if !seen.insert(id) {
            return Err(SquirrelError::Duplicate {
                entity_type,
                identifier,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> BackupData {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
        BackupData::new(
            vec![Setting::new("backupOnClose", true)],
            vec![Task::new(1, "Test Task", start).with_project("Test Project")],
            vec![Todo::new(1, "Test Todo", start)],
        )
    }

    #[test]
    fn test_counts() {
        let data = sample();
        assert_eq!(data.record_count(), 3);
        assert!(!data.is_empty());
        assert!(BackupData::default().is_empty());
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let json = r#"{"settings":[],"tasks":[],"todos":[],"exportedBy":"other"}"#;
        let data: BackupData = serde_json::from_str(json).unwrap();
        assert_eq!(data.extra["exportedBy"], "other");

        let back = serde_json::to_value(&data).unwrap();
        assert_eq!(back["exportedBy"], "other");
    }

    #[test]
    fn test_no_extra_fields_serialized_by_default() {
        let value = serde_json::to_value(sample()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut data = sample();
        assert!(data.validate().is_ok());

        data.tasks.push(data.tasks[0].clone());
        let err = data.validate().unwrap_err();
        assert_eq!(err.to_string(), "Task already exists: 1");
    }
}
