//! Task model
//!
//! A task is a tracked span of time. A task without an end is still running.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// What was worked on
    pub name: String,

    /// When work started
    pub start: DateTime<Utc>,

    /// When work stopped; absent while running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,

    /// Optional project grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl Task {
    /// Create a running task
    pub fn new(id: i64, name: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            start,
            end: None,
            project: None,
        }
    }

    /// Builder-style project assignment
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Builder-style end time
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Check whether the task is still in progress
    pub fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Elapsed time, measured up to `now` for running tasks
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        self.end.unwrap_or(now) - self.start
    }

    /// Validate user-entered fields
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Task name cannot be empty".to_string());
        }
        if let Some(end) = self.end {
            if end < self.start {
                return Err("Task cannot end before it starts".to_string());
            }
        }
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)?;
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

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_running_task() {
        let task = Task::new(1, "Write report", at(10));
        assert!(task.is_running());
        assert_eq!(task.duration(at(12)), Duration::hours(2));
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let task = Task::new(1, "Write report", at(10));
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"Write report","start":"2023-01-01T10:00:00Z"}"#
        );
    }

    #[test]
    fn test_parses_millisecond_timestamps() {
        let task: Task = serde_json::from_str(
            r#"{"id":7,"name":"Review","start":"2023-01-01T10:00:00.000Z","end":"2023-01-01T11:00:00.000Z","project":"Ops"}"#,
        )
        .unwrap();
        assert_eq!(task.start, at(10));
        assert_eq!(task.end, Some(at(11)));
        assert_eq!(task.project.as_deref(), Some("Ops"));
    }

    #[test]
    fn test_validate() {
        assert!(Task::new(1, "ok", at(10)).validate().is_ok());
        assert!(Task::new(1, "  ", at(10)).validate().is_err());
        assert!(Task::new(1, "x", at(10)).with_end(at(9)).validate().is_err());
    }
}
