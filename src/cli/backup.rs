//! Backup CLI commands
//!
//! Implements CLI commands for creating, inspecting and restoring backups.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use crate::backup::{
    inspect, read_backup_file, validate_password, BackupKind, BackupManager, BackupRequest,
    DecodedBackup, RestoreManager,
};
use crate::config::Preferences;
use crate::crypto::{evaluate, SecureString};
use crate::display::{format_backup_list, format_inspection, format_strength};
use crate::error::{SquirrelError, SquirrelResult};
use crate::storage::{DatasetStore, Storage};

/// Environment variable that supplies the backup password
pub const PASSWORD_ENV: &str = "SQUIRREL_BACKUP_PASSWORD";

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create {
        /// Protect the backup with a password
        #[arg(short, long)]
        encrypted: bool,

        /// Directory to write the backup to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Backup password (prompted when not set)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Replace current data without asking
        #[arg(short, long)]
        force: bool,

        /// Backup password (prompted when needed and not set)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },

    /// Show what a backup contains without restoring it
    Inspect {
        /// Backup filename or path
        backup: String,
    },

    /// Score a password against the backup password rules
    #[command(name = "check-password")]
    CheckPassword {
        /// Password to check (prompted when not set)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    preferences: &Preferences,
    cmd: BackupCommands,
) -> SquirrelResult<()> {
    let backup_dir = preferences.resolve_backup_dir(storage.paths());

    match cmd {
        BackupCommands::Create {
            encrypted,
            output,
            password,
        } => {
            let manager = BackupManager::new(storage, output.unwrap_or(backup_dir))
                .pretty(preferences.pretty_backups);

            let request = if !encrypted {
                BackupRequest::Plain
            } else if let Some(password) = password {
                println!("{}", format_strength(&evaluate(&password)));
                BackupRequest::Encrypted {
                    password: Some(password.into()),
                    confirmation: None,
                }
            } else {
                prompt_new_password()?
            };

            println!("Creating {} backup...", request.kind());
            let info = manager.create_backup(&request)?;
            println!("Backup created: {}", info.filename);
            println!("Location: {}", info.path.display());
        }

        BackupCommands::List { verbose } => {
            let manager = BackupManager::new(storage, backup_dir);
            let backups = manager.list_backups()?;
            println!("{}", format_backup_list(&backups, Utc::now(), verbose));
        }

        BackupCommands::Restore {
            backup,
            force,
            password,
        } => {
            let manager =
                BackupManager::new(storage, backup_dir).pretty(preferences.pretty_backups);
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let contents = read_backup_file(&backup_path)?;
            let inspection = inspect(&contents)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            println!("{}", format_inspection(&inspection, contents.len() as u64));
            println!();

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  squirrel backup restore {} --force", backup);
                return Ok(());
            }

            // Nothing is written until the backup decodes
            let restorer = RestoreManager::new(storage);
            let decoded = decode_backup(&restorer, &contents, inspection.kind, password, || {
                prompt_password("Backup password: ")
            })?;

            // Create a backup of current data before restoring
            println!("Creating backup of current data before restore...");
            let safety = manager.create_backup(&BackupRequest::Plain)?;
            println!("Pre-restore backup saved: {}", safety.filename);
            println!();

            println!("Restoring from backup...");
            let summary = restorer.apply(&decoded)?;
            println!("Restore complete!");
            println!("{}", summary.summary());
        }

        BackupCommands::Inspect { backup } => {
            let manager = BackupManager::new(storage, backup_dir);
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let contents = read_backup_file(&backup_path)?;
            let inspection = inspect(&contents)?;

            println!("Backup Details");
            println!("==============");
            println!("File: {}", backup_path.display());
            println!("{}", format_inspection(&inspection, contents.len() as u64));
        }

        BackupCommands::CheckPassword { password } => {
            let password = match password {
                Some(password) => SecureString::from(password),
                None => prompt_password("Password: ")?,
            };
            println!("{}", format_strength(&evaluate(&password)));
            match validate_password(Some(password.as_str()), None) {
                Ok(_) => println!("Accepted for encrypted backups."),
                Err(e) => println!("Not accepted for encrypted backups: {}", e),
            }
        }
    }

    Ok(())
}

/// Prompt for a new password and its confirmation until both pass validation
fn prompt_new_password() -> SquirrelResult<BackupRequest> {
    loop {
        let password = prompt_password("Enter backup password: ")?;
        println!("{}", format_strength(&evaluate(&password)));

        if let Err(e) = validate_password(Some(password.as_str()), None) {
            println!("{}. Please try again.", e);
            continue;
        }

        let confirmation = prompt_password("Confirm backup password: ")?;
        if let Err(e) = validate_password(Some(password.as_str()), Some(confirmation.as_str())) {
            println!("{}. Please try again.", e);
            continue;
        }

        return Ok(BackupRequest::Encrypted {
            password: Some(password),
            confirmation: Some(confirmation),
        });
    }
}

/// Decode a backup for restore.
///
/// A password given on the command line or in the environment is tried once.
/// Otherwise `prompt` is asked again after every recoverable password error.
fn decode_backup<S, F>(
    restorer: &RestoreManager<'_, S>,
    contents: &str,
    kind: BackupKind,
    password: Option<String>,
    mut prompt: F,
) -> SquirrelResult<DecodedBackup>
where
    S: DatasetStore,
    F: FnMut() -> SquirrelResult<SecureString>,
{
    if kind == BackupKind::Plain {
        return restorer.decode(contents, None);
    }
    if let Some(password) = password {
        let password = SecureString::from(password);
        return restorer.decode(contents, Some(password.as_str()));
    }

    loop {
        let password = prompt()?;
        match restorer.decode(contents, Some(password.as_str())) {
            Err(e) if e.is_recoverable_password_error() => println!("{}. Please try again.", e),
            result => return result,
        }
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> SquirrelResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| SquirrelError::Io(format!("Failed to read password: {}", e)))
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path<S: DatasetStore>(
    manager: &BackupManager<'_, S>,
    backup: &str,
) -> SquirrelResult<PathBuf> {
    // Handle "latest" keyword
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| SquirrelError::NotFound {
                entity_type: "Backup",
                identifier: "latest".to_string(),
            });
    }

    // Check if it's a full path
    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    // Check if it's a filename in the backup directory
    let backup_path = manager.backup_dir().join(backup);
    if backup_path.exists() {
        return Ok(backup_path);
    }

    let with_ext = manager.backup_dir().join(format!("{}.json", backup));
    if with_ext.exists() {
        return Ok(with_ext);
    }

    Err(SquirrelError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    })
}
