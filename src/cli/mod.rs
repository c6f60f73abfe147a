//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the storage and backup layers.

use crate::error::SquirrelResult;
use crate::storage::Storage;

pub mod backup;
pub mod setting;
pub mod task;
pub mod todo;

pub use backup::{handle_backup_command, BackupCommands, PASSWORD_ENV};
pub use setting::{handle_setting_command, SettingCommands};
pub use task::{handle_task_command, TaskCommands};
pub use todo::{handle_todo_command, TodoCommands};

/// Printed after a change while the `backupOnClose` setting is on
pub const BACKUP_REMINDER: &str =
    "Reminder: backup on close is enabled. Run 'squirrel backup create' to save your changes.";

/// Remind the user to back up after a change, if they asked for it
fn remind_backup(storage: &Storage) -> SquirrelResult<()> {
    if storage.settings.backup_on_close()? {
        println!("{}", BACKUP_REMINDER);
    }
    Ok(())
}
