//! Task CLI commands
//!
//! Implements CLI commands for time tracking.

use chrono::Utc;
use clap::Subcommand;

use super::remind_backup;
use crate::display::{format_duration, format_task_list};
use crate::error::SquirrelResult;
use crate::storage::{CollectionStore, Storage};

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Start tracking a new task
    #[command(alias = "start")]
    Add {
        /// What you are working on
        name: String,
        /// Project name
        #[arg(short, long)]
        project: Option<String>,
    },

    /// List tasks
    List {
        /// Only show running tasks
        #[arg(short, long)]
        running: bool,
    },

    /// Stop a running task
    Stop {
        /// Task ID
        id: i64,
    },
}

/// Handle a task command
pub fn handle_task_command(storage: &Storage, cmd: TaskCommands) -> SquirrelResult<()> {
    match cmd {
        TaskCommands::Add { name, project } => {
            let task = storage.tasks.start(name, project, Utc::now())?;
            storage.tasks.save()?;
            println!("Started task: {}", task);
            remind_backup(storage)?;
        }

        TaskCommands::List { running } => {
            let tasks = if running {
                storage.tasks.running()?
            } else {
                storage.tasks.all()?
            };
            println!("{}", format_task_list(&tasks, Utc::now()));
        }

        TaskCommands::Stop { id } => {
            let now = Utc::now();
            let task = storage.tasks.stop(id, now)?;
            storage.tasks.save()?;
            println!("Stopped task: {} ({})", task, format_duration(task.duration(now)));
            remind_backup(storage)?;
        }
    }

    Ok(())
}
