//! Todo CLI commands

use chrono::Utc;
use clap::Subcommand;

use super::remind_backup;
use crate::display::format_todo_list;
use crate::error::SquirrelResult;
use crate::storage::{CollectionStore, Storage};

/// Todo subcommands
#[derive(Subcommand)]
pub enum TodoCommands {
    /// Add a todo
    Add {
        /// Todo text
        name: String,
        /// Project name
        #[arg(short, long)]
        project: Option<String>,
    },

    /// List todos
    List,

    /// Mark a todo as done
    Done {
        /// Todo ID
        id: i64,
    },
}

/// Handle a todo command
pub fn handle_todo_command(storage: &Storage, cmd: TodoCommands) -> SquirrelResult<()> {
    match cmd {
        TodoCommands::Add { name, project } => {
            let todo = storage.todos.add(name, project, Utc::now())?;
            storage.todos.save()?;
            println!("Added todo: {}", todo);
            remind_backup(storage)?;
        }

        TodoCommands::List => {
            println!("{}", format_todo_list(&storage.todos.all()?));
        }

        TodoCommands::Done { id } => {
            let todo = storage.todos.complete(id, Utc::now())?;
            storage.todos.save()?;
            println!("Completed: {}", todo);
            remind_backup(storage)?;
        }
    }

    Ok(())
}
