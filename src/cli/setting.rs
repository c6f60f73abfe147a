//! Setting CLI commands
//!
//! Settings are user data and travel with every backup.

use clap::Subcommand;

use super::remind_backup;
use crate::error::SquirrelResult;
use crate::models::SettingValue;
use crate::storage::{CollectionStore, Storage};

/// Setting subcommands
#[derive(Subcommand)]
pub enum SettingCommands {
    /// Set a setting (`true`/`false` and numbers keep their type)
    Set {
        /// Setting ID, e.g. backupOnClose
        id: String,
        /// New value
        value: String,
    },

    /// List all settings
    List,
}

/// Handle a setting command
pub fn handle_setting_command(storage: &Storage, cmd: SettingCommands) -> SquirrelResult<()> {
    match cmd {
        SettingCommands::Set { id, value } => {
            let value = SettingValue::parse(&value);
            storage.settings.set(id.clone(), value.clone())?;
            storage.settings.save()?;
            println!("{} = {}", id, value);
            remind_backup(storage)?;
        }

        SettingCommands::List => {
            let settings = storage.settings.all()?;
            if settings.is_empty() {
                println!("No settings found.");
            }
            for setting in settings {
                println!("{} = {}", setting.id, setting.value);
            }
            if storage.settings.backup_on_close()? {
                println!();
                println!("Backup on close is enabled.");
            }
        }
    }

    Ok(())
}
