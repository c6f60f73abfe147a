//! Path management for Squirrel
//!
//! ## Path Resolution Order
//!
//! 1. `SQUIRREL_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/squirrel` on Linux, `%APPDATA%\squirrel` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SquirrelError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SQUIRREL_DATA_DIR";

/// Manages all paths used by Squirrel
#[derive(Debug, Clone)]
pub struct SquirrelPaths {
    /// Base directory for all Squirrel data
    base_dir: PathBuf,
}

impl SquirrelPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SquirrelError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "squirrel")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SquirrelError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create SquirrelPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default backup directory (`<base>/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the preferences file
    pub fn preferences_file(&self) -> PathBuf {
        self.base_dir.join("preferences.json")
    }

    /// Get the path to settings.json
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir().join("settings.json")
    }

    /// Get the path to tasks.json
    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir().join("tasks.json")
    }

    /// Get the path to todos.json
    pub fn todos_file(&self) -> PathBuf {
        self.data_dir().join("todos.json")
    }

    /// Ensure the base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), SquirrelError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SquirrelError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SquirrelError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| SquirrelError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}
