//! Backup system for Squirrel
//!
//! Exports the whole dataset to a single file and restores from it, with
//! optional password protection.
//!
//! # Architecture
//!
//! - `format`: envelope types, `wrap_encrypted`/`wrap_plain` and file names
//! - `detector`: classifies file text as encrypted, plain or unrecognised
//! - `BackupManager`: captures the dataset and writes backup files
//! - `RestoreManager`: detects, decrypts and replaces the dataset
//!
//! # Backup Format
//!
//! A plain backup is `{settings, tasks, todos}`. An encrypted backup is an
//! envelope with `format = "squirrel-encrypted-backup"`, `version`,
//! `metadata`, `crypto` (salt, iv, authTag) and the base64 ciphertext in
//! `data`. Restore looks only at file content, never at the file name.
//!
//! # Example
//!
//! ```rust,ignore
//! use squirrel::backup::{BackupManager, BackupRequest, RestoreManager};
//!
//! let manager = BackupManager::new(&storage, paths.backup_dir());
//! let info = manager.create_backup(&BackupRequest::encrypted(password, confirmation))?;
//!
//! // Later, restore from backup
//! let summary = RestoreManager::new(&storage).restore_from_file(&info.path, Some(password))?;
//! println!("{}", summary.summary());
//! ```

pub mod detector;
pub mod format;
mod manager;
mod restore;

pub use detector::{detect, DetectedBackup};
pub use format::{
    wrap_encrypted, wrap_encrypted_at, wrap_plain, BackupKind, EncryptedBackupFormat,
    PlainBackupFormat, FORMAT_ID, FORMAT_VERSION,
};
pub use manager::{validate_password, BackupInfo, BackupManager, BackupRequest};
pub use restore::{
    inspect, read_backup_file, BackupInspection, DecodedBackup, RecordCounts, RestoreManager,
    RestoreSummary,
};
