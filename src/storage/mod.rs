//! Storage layer for Squirrel
//!
//! Provides JSON file storage with atomic writes. Every collection is a
//! [`Repository`]; [`Storage`] coordinates the three of them and implements
//! the [`DatasetStore`] port used by backup and restore.

pub mod file_io;
pub mod repository;
pub mod settings;
pub mod tasks;
pub mod todos;

pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use repository::{CollectionStore, Record, Repository};
pub use settings::SettingRepository;
pub use tasks::TaskRepository;
pub use todos::TodoRepository;

use tracing::{debug, warn};

use crate::config::paths::SquirrelPaths;
use crate::error::SquirrelResult;
use crate::models::BackupData;

/// Whole-dataset access for backup and restore
pub trait DatasetStore {
    /// Capture the current settings, tasks and todos as a value
    fn snapshot(&self) -> SquirrelResult<BackupData>;

    /// Clear every collection, then insert settings, tasks and todos from
    /// `data`. On error the previous contents must still be in place.
    fn replace_all(&self, data: &BackupData) -> SquirrelResult<()>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SquirrelPaths,
    pub settings: SettingRepository,
    pub tasks: TaskRepository,
    pub todos: TodoRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SquirrelPaths) -> SquirrelResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            settings: SettingRepository::new(paths.settings_file()),
            tasks: TaskRepository::new(paths.tasks_file()),
            todos: TodoRepository::new(paths.todos_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SquirrelPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> SquirrelResult<()> {
        self.settings.load()?;
        self.tasks.load()?;
        self.todos.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> SquirrelResult<()> {
        self.settings.save()?;
        self.tasks.save()?;
        self.todos.save()?;
        Ok(())
    }

    fn apply(&self, data: &BackupData) -> SquirrelResult<()> {
        self.settings.clear()?;
        self.tasks.clear()?;
        self.todos.clear()?;

        self.settings.bulk_insert(data.settings.clone())?;
        self.tasks.bulk_insert(data.tasks.clone())?;
        self.todos.bulk_insert(data.todos.clone())?;
        Ok(())
    }
}

impl DatasetStore for Storage {
    fn snapshot(&self) -> SquirrelResult<BackupData> {
        Ok(BackupData::new(
            self.settings.all()?,
            self.tasks.all()?,
            self.todos.all()?,
        ))
    }

    fn replace_all(&self, data: &BackupData) -> SquirrelResult<()> {
        // Reject duplicates before anything is cleared
        data.validate()?;

        let previous = self.snapshot()?;

        let result = self.apply(data).and_then(|_| self.save_all());
        if let Err(err) = result {
            warn!(error = %err, "restore failed, rolling back to previous data");
            if let Err(rollback_err) = self.apply(&previous).and_then(|_| self.save_all()) {
                warn!(error = %rollback_err, "rollback could not be persisted");
            }
            return Err(err);
        }

        debug!(
            settings = data.settings.len(),
            tasks = data.tasks.len(),
            todos = data.todos.len(),
            "dataset replaced"
        );
        Ok(())
    }
}
