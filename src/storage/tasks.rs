//! Tasks collection

use chrono::{DateTime, Utc};

use crate::error::{SquirrelError, SquirrelResult};
use crate::models::Task;

use super::repository::{CollectionStore, Record, Repository};

impl Record for Task {
    type Id = i64;
    const ENTITY: &'static str = "Task";

    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Repository for tasks.json
pub type TaskRepository = Repository<Task>;

impl Repository<Task> {
    /// Next free id (one past the highest)
    pub fn next_id(&self) -> SquirrelResult<i64> {
        match self.all()?.last() {
            None => Ok(1),
            Some(last) => last.id.checked_add(1).ok_or_else(|| {
                SquirrelError::Validation(format!("No task id left after {}", last.id))
            }),
        }
    }

    /// Start tracking a new task and return it
    pub fn start(
        &self,
        name: impl Into<String>,
        project: Option<String>,
        at: DateTime<Utc>,
    ) -> SquirrelResult<Task> {
        let mut task = Task::new(self.next_id()?, name, at);
        task.project = project;
        task.validate().map_err(SquirrelError::Validation)?;
        self.insert(task.clone())?;
        Ok(task)
    }

    /// Tasks that have not been stopped
    pub fn running(&self) -> SquirrelResult<Vec<Task>> {
        Ok(self.all()?.into_iter().filter(Task::is_running).collect())
    }

    /// Stop a running task
    pub fn stop(&self, id: i64, at: DateTime<Utc>) -> SquirrelResult<Task> {
        let task = self.get(&id)?.ok_or_else(|| SquirrelError::task_not_found(id))?;
        if !task.is_running() {
            return Err(SquirrelError::Validation(format!("Task {} is not running", id)));
        }
        if at < task.start {
            return Err(SquirrelError::Validation(
                "Task cannot end before it starts".to_string(),
            ));
        }
        self.update(&id, |t| t.end = Some(at))?
            .ok_or_else(|| SquirrelError::task_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    #[test]
    fn test_start_assigns_sequential_ids() {
        let temp = TempDir::new().unwrap();
        let repo = TaskRepository::new(temp.path().join("tasks.json"));
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

        let first = repo.start("Email", None, now).unwrap();
        let second = repo.start("Review", Some("Ops".into()), now).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.running().unwrap().len(), 2);
    }

    #[test]
    fn test_stop() {
        let temp = TempDir::new().unwrap();
        let repo = TaskRepository::new(temp.path().join("tasks.json"));
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

        let task = repo.start("Email", None, now).unwrap();
        let stopped = repo.stop(task.id, now + Duration::minutes(30)).unwrap();

        assert!(!stopped.is_running());
        assert!(repo.stop(task.id, now).is_err());
        assert!(repo.stop(99, now).unwrap_err().is_not_found());
    }

    #[test]
    fn test_start_after_restored_max_id_fails_cleanly() {
        let temp = TempDir::new().unwrap();
        let paths = crate::config::SquirrelPaths::with_base_dir(temp.path().to_path_buf());
        let storage = crate::storage::Storage::new(paths).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

        let text = r#"{"settings": [], "todos": [], "tasks": [
            {"id": 9223372036854775807, "name": "Restored", "start": "2024-05-01T08:00:00Z"}
        ]}"#;
        crate::backup::RestoreManager::new(&storage).restore(text, None).unwrap();

        let err = storage.tasks.start("Next", None, now).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.tasks.count().unwrap(), 1);
    }
}
