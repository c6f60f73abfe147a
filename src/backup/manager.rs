//! Backup manager for Squirrel
//!
//! Captures the dataset, encodes it as a plain or encrypted backup and
//! writes the file into the backup directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::crypto::strength::{evaluate, MIN_BACKUP_SCORE, MIN_PASSWORD_LENGTH};
use crate::crypto::{encrypt_with, CipherProvider, SecureString, SystemCipher};
use crate::error::{SquirrelError, SquirrelResult};
use crate::storage::{write_atomic, DatasetStore};

use super::format::{wrap_encrypted_at, wrap_plain, BackupKind};

/// What kind of backup to create
#[derive(Debug, Clone)]
pub enum BackupRequest {
    Plain,
    /// `confirmation` is checked only when the caller collected one
    Encrypted {
        password: Option<SecureString>,
        confirmation: Option<SecureString>,
    },
}

impl BackupRequest {
    /// Encrypted backup with a password and its confirmation
    pub fn encrypted(password: impl Into<SecureString>, confirmation: impl Into<SecureString>) -> Self {
        BackupRequest::Encrypted {
            password: Some(password.into()),
            confirmation: Some(confirmation.into()),
        }
    }

    pub fn kind(&self) -> BackupKind {
        match self {
            BackupRequest::Plain => BackupKind::Plain,
            BackupRequest::Encrypted { .. } => BackupKind::Encrypted,
        }
    }
}

/// Metadata about a backup file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    pub kind: BackupKind,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Check a password before encrypting with it.
///
/// Rules apply in order: present, at least 8 characters, strength score of
/// at least 2, then equal to `confirmation` when one is given.
pub fn validate_password<'a>(
    password: Option<&'a str>,
    confirmation: Option<&str>,
) -> SquirrelResult<&'a str> {
    let password = password
        .filter(|p| !p.is_empty())
        .ok_or(SquirrelError::PasswordRequired)?;

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SquirrelError::WeakPassword(format!(
            "must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let strength = evaluate(password);
    if strength.score < MIN_BACKUP_SCORE {
        return Err(SquirrelError::WeakPassword(format!(
            "strength is {}, add {}",
            strength.label,
            strength.requirements.missing().join(", ")
        )));
    }

    if let Some(confirmation) = confirmation {
        if confirmation != password {
            return Err(SquirrelError::PasswordMismatch);
        }
    }

    Ok(password)
}

/// Creates backups of a dataset store
pub struct BackupManager<'a, S, C = SystemCipher> {
    store: &'a S,
    cipher: C,
    backup_dir: PathBuf,
    pretty: bool,
}

impl<'a, S: DatasetStore> BackupManager<'a, S> {
    /// Create a new BackupManager writing into `backup_dir`
    pub fn new(store: &'a S, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            cipher: SystemCipher,
            backup_dir: backup_dir.into(),
            pretty: true,
        }
    }
}

impl<'a, S: DatasetStore, C: CipherProvider> BackupManager<'a, S, C> {
    /// Use another cipher provider
    pub fn with_cipher<P: CipherProvider>(self, cipher: P) -> BackupManager<'a, S, P> {
        BackupManager {
            store: self.store,
            cipher,
            backup_dir: self.backup_dir,
            pretty: self.pretty,
        }
    }

    /// Pretty-print written files
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Create a backup of all data.
    ///
    /// Nothing is written unless encoding succeeded.
    pub fn create_backup(&self, request: &BackupRequest) -> SquirrelResult<BackupInfo> {
        let created_at = Utc::now();

        let (contents, counts) = match request {
            BackupRequest::Plain => {
                let data = self.store.snapshot()?;
                let counts = (data.settings.len(), data.tasks.len(), data.todos.len());
                (self.render(&wrap_plain(data))?, counts)
            }
            BackupRequest::Encrypted {
                password,
                confirmation,
            } => {
                let password = validate_password(password.as_deref(), confirmation.as_deref())?;
                let data = self.store.snapshot()?;
                let counts = (data.settings.len(), data.tasks.len(), data.todos.len());
                let result = encrypt_with(&self.cipher, &data, password)?;
                (self.render(&wrap_encrypted_at(result, created_at))?, counts)
            }
        };

        let kind = request.kind();
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            SquirrelError::Io(format!("Failed to create backup directory: {}", e))
        })?;
        let filename = kind.file_name(created_at);
        let path = self.backup_dir.join(&filename);
        write_atomic(&path, contents.as_bytes())?;

        info!(
            kind = %kind,
            path = %path.display(),
            settings = counts.0,
            tasks = counts.1,
            todos = counts.2,
            "backup created"
        );

        Ok(BackupInfo {
            filename,
            path,
            kind,
            created_at,
            size_bytes: contents.len() as u64,
        })
    }

    fn render<T: Serialize>(&self, value: &T) -> SquirrelResult<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| SquirrelError::Json(format!("Failed to serialize backup: {}", e)))
    }

    /// List all backups in the backup directory, newest first
    pub fn list_backups(&self) -> SquirrelResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            SquirrelError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                SquirrelError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Get the most recent backup
    pub fn latest_backup(&self) -> SquirrelResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let (kind, created_at) = BackupKind::parse_file_name(&filename)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        kind,
        created_at,
        size_bytes,
    })
}
