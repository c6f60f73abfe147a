//! User preferences for Squirrel
//!
//! Preferences configure the tool itself (logging, where backups go). They
//! are separate from the `settings` collection, which is user data and part
//! of every backup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::SquirrelPaths;
use crate::error::SquirrelError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Tool preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for new backups; `<base>/backups` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,

    /// Pretty-print written backup files
    #[serde(default = "default_pretty_backups")]
    pub pretty_backups: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_pretty_backups() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            log_level: default_log_level(),
            backup_dir: None,
            pretty_backups: default_pretty_backups(),
        }
    }
}

impl Preferences {
    /// Load preferences from disk, or defaults if the file doesn't exist
    pub fn load_or_default(paths: &SquirrelPaths) -> Result<Self, SquirrelError> {
        read_json(paths.preferences_file())
            .map_err(|e| SquirrelError::Config(format!("Failed to load preferences: {}", e)))
    }

    /// Save preferences to disk
    pub fn save(&self, paths: &SquirrelPaths) -> Result<(), SquirrelError> {
        write_json_atomic(paths.preferences_file(), self)
    }

    /// The directory new backups are written to
    pub fn resolve_backup_dir(&self, paths: &SquirrelPaths) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| paths.backup_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert_eq!(prefs.log_level, "warn");
        assert!(prefs.pretty_backups);
        assert!(prefs.backup_dir.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SquirrelPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut prefs = Preferences::default();
        prefs.log_level = "debug".into();
        prefs.backup_dir = Some(temp_dir.path().join("elsewhere"));
        prefs.save(&paths).unwrap();

        let loaded = Preferences::load_or_default(&paths).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.resolve_backup_dir(&paths), temp_dir.path().join("elsewhere"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.schema_version, 1);
        assert!(prefs.pretty_backups);
    }
}
