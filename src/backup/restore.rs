//! Backup restoration for Squirrel
//!
//! Detects the backup kind, decrypts when needed, then replaces the whole
//! dataset. The store is never touched before the backup is fully decoded.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::crypto::{decrypt_with, CipherProvider, SystemCipher};
use crate::error::{SquirrelError, SquirrelResult};
use crate::models::BackupData;
use crate::storage::DatasetStore;

use super::detector::{detect, DetectedBackup};
use super::format::BackupKind;

/// Handles restoring from backups
pub struct RestoreManager<'a, S, C = SystemCipher> {
    store: &'a S,
    cipher: C,
}

impl<'a, S: DatasetStore> RestoreManager<'a, S> {
    /// Create a new RestoreManager
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            cipher: SystemCipher,
        }
    }
}

impl<'a, S: DatasetStore, C: CipherProvider> RestoreManager<'a, S, C> {
    /// Use another cipher provider
    pub fn with_cipher<P: CipherProvider>(self, cipher: P) -> RestoreManager<'a, S, P> {
        RestoreManager {
            store: self.store,
            cipher,
        }
    }

    /// Restore data from backup file text.
    ///
    /// This overwrites all current settings, tasks and todos. Encrypted
    /// backups need `password`; a wrong one fails with `DecryptionFailed`.
    pub fn restore(&self, file_text: &str, password: Option<&str>) -> SquirrelResult<RestoreSummary> {
        let decoded = self.decode(file_text, password)?;
        self.apply(&decoded)
    }

    /// Detect and, for encrypted files, decrypt a backup without touching
    /// the store
    pub fn decode(&self, file_text: &str, password: Option<&str>) -> SquirrelResult<DecodedBackup> {
        let detected = detect(file_text)?;
        let kind = detected.kind();

        let data = match detected {
            DetectedBackup::Plain(data) => data,
            DetectedBackup::Encrypted(envelope) => {
                let password = password
                    .filter(|p| !p.is_empty())
                    .ok_or(SquirrelError::PasswordRequired)?;
                decrypt_with(&self.cipher, &envelope.decryption_options(password))?
            }
        };

        Ok(DecodedBackup { kind, data })
    }

    /// Replace the whole dataset with a decoded backup
    pub fn apply(&self, decoded: &DecodedBackup) -> SquirrelResult<RestoreSummary> {
        let kind = decoded.kind;
        let data = &decoded.data;
        info!(kind = %kind, "restore started");

        self.store.replace_all(data)?;

        let summary = RestoreSummary {
            kind,
            settings: data.settings.len(),
            tasks: data.tasks.len(),
            todos: data.todos.len(),
        };
        info!(
            kind = %kind,
            settings = summary.settings,
            tasks = summary.tasks,
            todos = summary.todos,
            "restore completed"
        );
        Ok(summary)
    }

    /// Restore data from a backup file
    pub fn restore_from_file(
        &self,
        backup_path: &Path,
        password: Option<&str>,
    ) -> SquirrelResult<RestoreSummary> {
        let contents = read_backup_file(backup_path)?;
        self.restore(&contents, password)
    }
}

/// Read a backup file as text
pub fn read_backup_file(backup_path: &Path) -> SquirrelResult<String> {
    fs::read_to_string(backup_path)
        .map_err(|e| SquirrelError::Io(format!("Failed to read backup file: {}", e)))
}

/// Describe a backup without decrypting it or touching the store
pub fn inspect(file_text: &str) -> SquirrelResult<BackupInspection> {
    let inspection = match detect(file_text)? {
        DetectedBackup::Encrypted(envelope) => BackupInspection {
            kind: BackupKind::Encrypted,
            // Unparseable instants are shown as written
            created: match envelope.metadata.created_at() {
                Some(at) => Some(at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
                None => Some(envelope.metadata.created).filter(|c| !c.is_empty()),
            },
            version: Some(envelope.version),
            app_version: Some(envelope.metadata.app_version).filter(|v| !v.is_empty()),
            counts: None,
        },
        DetectedBackup::Plain(data) => BackupInspection {
            kind: BackupKind::Plain,
            version: None,
            created: None,
            app_version: None,
            counts: Some(RecordCounts {
                settings: data.settings.len(),
                tasks: data.tasks.len(),
                todos: data.todos.len(),
            }),
        },
    };
    Ok(inspection)
}

/// A backup that has been read and decrypted but not yet applied
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBackup {
    pub kind: BackupKind,
    pub data: BackupData,
}

/// Number of records per collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub settings: usize,
    pub tasks: usize,
    pub todos: usize,
}

/// What a backup file contains, as far as can be told without a password
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupInspection {
    pub kind: BackupKind,
    /// Envelope version (encrypted only)
    pub version: Option<String>,
    /// Creation instant from the envelope (encrypted only)
    pub created: Option<String>,
    pub app_version: Option<String>,
    /// Record counts (plain only; encrypted contents are opaque)
    pub counts: Option<RecordCounts>,
}

impl BackupInspection {
    /// Get a summary of the backup contents
    pub fn summary(&self) -> String {
        match &self.counts {
            Some(counts) => format!(
                "Plain backup: {} settings, {} tasks, {} todos",
                counts.settings, counts.tasks, counts.todos
            ),
            None => format!(
                "Encrypted backup v{} created {} by squirrel {}",
                self.version.as_deref().unwrap_or("?"),
                self.created.as_deref().unwrap_or("at an unknown time"),
                self.app_version.as_deref().unwrap_or("(unknown version)")
            ),
        }
    }
}

/// Result of a restore operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestoreSummary {
    pub kind: BackupKind,
    pub settings: usize,
    pub tasks: usize,
    pub todos: usize,
}

impl RestoreSummary {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!(
            "Restored {} settings, {} tasks, {} todos from {} backup",
            self.settings, self.tasks, self.todos, self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::format::{wrap_encrypted, wrap_encrypted_at, wrap_plain};
    use crate::backup::manager::{BackupManager, BackupRequest};
    use crate::config::SquirrelPaths;
    use crate::crypto::encrypt;
    use crate::models::{Setting, Task, Todo};
    use crate::storage::{CollectionStore, Storage};
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;
    use tempfile::TempDir;

    const PASSWORD: &str = "StrongPassword123!";

    fn sample_data() -> BackupData {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2023, 1, 1, 11, 0, 0).unwrap();
        BackupData::new(
            vec![Setting::new("backupOnClose", true)],
            vec![Task::new(1, "Test Task", start)
                .with_project("Test Project")
                .with_end(end)],
            vec![Todo::new(1, "Test Todo", start).with_project("Test Project")],
        )
    }

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SquirrelPaths::with_base_dir(temp_dir.path().to_path_buf());
        (Storage::new(paths).unwrap(), temp_dir)
    }

    /// In-memory store that records what it was asked to do
    #[derive(Default)]
    struct RecordingStore {
        current: RefCell<BackupData>,
        fail_replace: bool,
    }

    impl DatasetStore for RecordingStore {
        fn snapshot(&self) -> SquirrelResult<BackupData> {
            Ok(self.current.borrow().clone())
        }

        fn replace_all(&self, data: &BackupData) -> SquirrelResult<()> {
            if self.fail_replace {
                return Err(SquirrelError::Storage("disk full".into()));
            }
            *self.current.borrow_mut() = data.clone();
            Ok(())
        }
    }

    #[test]
    fn test_restore_plain_backup() {
        let store = RecordingStore::default();
        let text = serde_json::to_string(&wrap_plain(sample_data())).unwrap();

        let summary = RestoreManager::new(&store).restore(&text, None).unwrap();
        assert_eq!(summary.kind, BackupKind::Plain);
        assert_eq!((summary.settings, summary.tasks, summary.todos), (1, 1, 1));
        assert_eq!(*store.current.borrow(), sample_data());
    }

    #[test]
    fn test_restore_encrypted_backup() {
        let store = RecordingStore::default();
        let envelope = wrap_encrypted(encrypt(&sample_data(), PASSWORD).unwrap());
        let text = serde_json::to_string(&envelope).unwrap();

        let summary = RestoreManager::new(&store).restore(&text, Some(PASSWORD)).unwrap();
        assert_eq!(summary.kind, BackupKind::Encrypted);
        assert_eq!(*store.current.borrow(), sample_data());
    }

    #[test]
    fn test_encrypted_backup_requires_password() {
        let store = RecordingStore::default();
        let envelope = wrap_encrypted(encrypt(&sample_data(), PASSWORD).unwrap());
        let text = serde_json::to_string(&envelope).unwrap();
        let manager = RestoreManager::new(&store);

        assert!(matches!(
            manager.restore(&text, None),
            Err(SquirrelError::PasswordRequired)
        ));
        assert!(matches!(
            manager.restore(&text, Some("")),
            Err(SquirrelError::PasswordRequired)
        ));
        assert!(store.current.borrow().is_empty());
    }

    #[test]
    fn test_unrecognized_file_leaves_store_untouched() {
        let store = RecordingStore {
            current: RefCell::new(sample_data()),
            fail_replace: false,
        };
        let manager = RestoreManager::new(&store);

        for text in ["", "[]", r#"{"tasks": []}"#, r#"{"format": "squirrel-encrypted-backup"}"#] {
            let err = manager.restore(text, Some(PASSWORD)).unwrap_err();
            assert!(err.is_unrecognized_file());
        }
        assert_eq!(*store.current.borrow(), sample_data());
    }

    #[test]
    fn test_decode_leaves_store_untouched_until_applied() {
        let current = BackupData::new(vec![Setting::new("theme", "dark")], vec![], vec![]);
        let store = RecordingStore {
            current: RefCell::new(current.clone()),
            fail_replace: false,
        };
        let envelope = wrap_encrypted(encrypt(&sample_data(), PASSWORD).unwrap());
        let text = serde_json::to_string(&envelope).unwrap();
        let manager = RestoreManager::new(&store);

        assert!(matches!(
            manager.decode(&text, Some("WrongPassword!")),
            Err(SquirrelError::DecryptionFailed)
        ));
        let decoded = manager.decode(&text, Some(PASSWORD)).unwrap();
        assert_eq!(decoded.kind, BackupKind::Encrypted);
        assert_eq!(decoded.data, sample_data());
        assert_eq!(*store.current.borrow(), current);

        let summary = manager.apply(&decoded).unwrap();
        assert_eq!((summary.settings, summary.tasks, summary.todos), (1, 1, 1));
        assert_eq!(*store.current.borrow(), sample_data());
    }

    #[test]
    fn test_store_failure_is_propagated() {
        let store = RecordingStore {
            current: RefCell::new(BackupData::default()),
            fail_replace: true,
        };
        let text = serde_json::to_string(&sample_data()).unwrap();

        let err = RestoreManager::new(&store).restore(&text, None).unwrap_err();
        assert!(matches!(err, SquirrelError::Storage(_)));
    }

    #[test]
    fn test_inspect_reports_without_decrypting() {
        let envelope = wrap_encrypted(encrypt(&sample_data(), PASSWORD).unwrap());
        let inspection = inspect(&serde_json::to_string(&envelope).unwrap()).unwrap();
        assert_eq!(inspection.kind, BackupKind::Encrypted);
        assert_eq!(inspection.version.as_deref(), Some("1.0"));
        assert!(inspection.created.is_some());
        assert!(inspection.counts.is_none());
        assert!(inspection.summary().starts_with("Encrypted backup v1.0"));

        let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let envelope = wrap_encrypted_at(encrypt(&sample_data(), PASSWORD).unwrap(), created);
        let inspection = inspect(&serde_json::to_string(&envelope).unwrap()).unwrap();
        assert_eq!(inspection.created.as_deref(), Some("2025-01-02 03:04:05 UTC"));

        let mut envelope = serde_json::to_value(&envelope).unwrap();
        envelope["metadata"]["created"] = "last tuesday".into();
        let inspection = inspect(&envelope.to_string()).unwrap();
        assert_eq!(inspection.created.as_deref(), Some("last tuesday"));

        let inspection = inspect(&serde_json::to_string(&sample_data()).unwrap()).unwrap();
        assert_eq!(inspection.kind, BackupKind::Plain);
        assert_eq!(
            inspection.counts,
            Some(RecordCounts {
                settings: 1,
                tasks: 1,
                todos: 1
            })
        );
    }

    #[test]
    fn test_end_to_end_encrypted_backup_and_restore() {
        let (storage, temp) = create_test_storage();
        storage.replace_all(&sample_data()).unwrap();

        let info = BackupManager::new(&storage, temp.path().join("backups"))
            .create_backup(&BackupRequest::encrypted(PASSWORD, PASSWORD))
            .unwrap();
        let text = fs::read_to_string(&info.path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["format"], "squirrel-encrypted-backup");
        assert_eq!(json["version"], "1.0");
        let data_field = json["data"].as_str().unwrap();
        assert!(!data_field.contains("Test Task"));
        assert!(!data_field.contains("Test Todo"));

        // Change the live data, then restore
        storage.tasks.start("Unsaved", None, Utc::now()).unwrap();
        let manager = RestoreManager::new(&storage);
        manager.restore_from_file(&info.path, Some(PASSWORD)).unwrap();
        assert_eq!(storage.snapshot().unwrap(), sample_data());

        storage.todos.add("After restore", None, Utc::now()).unwrap();
        let before = storage.snapshot().unwrap();
        let err = manager
            .restore_from_file(&info.path, Some("WrongPassword!"))
            .unwrap_err();
        assert!(matches!(err, SquirrelError::DecryptionFailed));
        assert_eq!(storage.snapshot().unwrap(), before);
    }

    #[test]
    fn test_restore_normalizes_settings_mapping() {
        let (storage, _temp) = create_test_storage();
        let text = r#"{"settings": {"backupOnClose": true}, "tasks": [], "todos": []}"#;

        RestoreManager::new(&storage).restore(text, None).unwrap();
        assert_eq!(
            storage.settings.all().unwrap(),
            vec![Setting::new("backupOnClose", true)]
        );
        assert!(storage.settings.backup_on_close().unwrap());
    }
}
