//! Todo model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// Todo text
    pub name: String,

    /// When the todo was created
    pub created_on: DateTime<Utc>,

    /// When the todo was completed; absent while open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,

    /// Optional project grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl Todo {
    /// Create an open todo
    pub fn new(id: i64, name: impl Into<String>, created_on: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created_on,
            completed_on: None,
            project: None,
        }
    }

    /// Builder-style project assignment
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Check whether the todo has been completed
    pub fn is_completed(&self) -> bool {
        self.completed_on.is_some()
    }

    /// Mark completed at the given instant
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.completed_on = Some(at);
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_completed() { "x" } else { " " };
        write!(f, "[{}] #{} {}", mark, self.id, self.name)?;
        if let Some(project) = &self.project {
            write!(f, " [{}]", project)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_camel_case_fields() {
        let created = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
        let mut todo = Todo::new(1, "Test Todo", created).with_project("Test Project");
        todo.complete(created);

        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["createdOn"], "2023-01-01T10:00:00Z");
        assert_eq!(value["completedOn"], "2023-01-01T10:00:00Z");
        assert!(value.get("created_on").is_none());
    }

    #[test]
    fn test_display() {
        let created = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
        let todo = Todo::new(3, "Buy milk", created);
        assert_eq!(todo.to_string(), "[ ] #3 Buy milk");
    }
}
