//! Settings collection

use crate::error::SquirrelResult;
use crate::models::{Setting, SettingValue, BACKUP_ON_CLOSE};

use super::repository::{Record, Repository};

impl Record for Setting {
    type Id = String;
    const ENTITY: &'static str = "Setting";

    fn record_id(&self) -> String {
        self.id.clone()
    }
}

/// Repository for settings.json
pub type SettingRepository = Repository<Setting>;

impl Repository<Setting> {
    /// Set a value, replacing any previous value for the same id
    pub fn set(&self, id: impl Into<String>, value: SettingValue) -> SquirrelResult<()> {
        self.upsert(Setting::new(id, value))
    }

    /// Whether the user wants a backup reminder on close (defaults to false)
    pub fn backup_on_close(&self) -> SquirrelResult<bool> {
        Ok(self
            .get(&BACKUP_ON_CLOSE.to_string())?
            .and_then(|s| s.value.as_bool())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CollectionStore;
    use tempfile::TempDir;

    #[test]
    fn test_set_overwrites() {
        let temp = TempDir::new().unwrap();
        let repo = SettingRepository::new(temp.path().join("settings.json"));

        repo.set("theme", "dark".into()).unwrap();
        repo.set("theme", "light".into()).unwrap();

        let all = repo.all().unwrap();
        assert_eq!(all, vec![Setting::new("theme", "light")]);
    }

    #[test]
    fn test_backup_on_close() {
        let temp = TempDir::new().unwrap();
        let repo = SettingRepository::new(temp.path().join("settings.json"));
        assert!(!repo.backup_on_close().unwrap());

        repo.set(BACKUP_ON_CLOSE, true.into()).unwrap();
        assert!(repo.backup_on_close().unwrap());

        repo.set(BACKUP_ON_CLOSE, "yes".into()).unwrap();
        assert!(!repo.backup_on_close().unwrap());
    }
}
