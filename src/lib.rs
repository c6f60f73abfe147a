//! Squirrel - terminal time tracking with password-protected backups
//!
//! This library provides the core of the Squirrel time tracker: a small
//! task/todo/settings store and the backup subsystem that exports the whole
//! dataset to one file and restores it, optionally encrypted with
//! AES-256-GCM under a PBKDF2-derived key.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and preferences
//! - `error`: Custom error types
//! - `models`: Settings, tasks, todos and the `BackupData` snapshot
//! - `storage`: JSON file storage layer
//! - `crypto`: Key derivation, encryption and password strength
//! - `backup`: Backup formats, detection, creation and restore
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use squirrel::backup::{BackupManager, BackupRequest};
//! use squirrel::config::paths::SquirrelPaths;
//! use squirrel::storage::Storage;
//!
//! let paths = SquirrelPaths::new()?;
//! let mut storage = Storage::new(paths.clone())?;
//! storage.load_all()?;
//! let info = BackupManager::new(&storage, paths.backup_dir()).create_backup(&BackupRequest::Plain)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::SquirrelError;
