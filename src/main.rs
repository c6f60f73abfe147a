use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use squirrel::cli::{
    handle_backup_command, handle_setting_command, handle_task_command, handle_todo_command,
    BackupCommands, SettingCommands, TaskCommands, TodoCommands,
};
use squirrel::config::{paths::SquirrelPaths, Preferences};
use squirrel::storage::Storage;

#[derive(Parser)]
#[command(
    name = "squirrel",
    version,
    about = "Terminal time tracker with password-protected backups",
    long_about = "Squirrel tracks tasks and todos from the command line. Its whole \
                  dataset can be exported to a single backup file, optionally \
                  encrypted with a password, and restored later."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Backup and restore commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Time tracking commands
    #[command(subcommand)]
    Task(TaskCommands),

    /// Todo commands
    #[command(subcommand)]
    Todo(TodoCommands),

    /// Setting commands
    #[command(subcommand)]
    Setting(SettingCommands),

    /// Show current configuration and paths
    Config,
}

fn init_logging(preferences: &Preferences) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&preferences.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and preferences
    let paths = SquirrelPaths::new()?;
    let preferences = Preferences::load_or_default(&paths)?;
    init_logging(&preferences);

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Backup(cmd)) => handle_backup_command(&storage, &preferences, cmd)?,
        Some(Commands::Task(cmd)) => handle_task_command(&storage, cmd)?,
        Some(Commands::Todo(cmd)) => handle_todo_command(&storage, cmd)?,
        Some(Commands::Setting(cmd)) => handle_setting_command(&storage, cmd)?,
        Some(Commands::Config) => {
            println!("Squirrel Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!(
                "Backup directory: {}",
                preferences.resolve_backup_dir(&paths).display()
            );
            println!();
            println!("Preferences:");
            println!("  Log level:      {}", preferences.log_level);
            println!("  Pretty backups: {}", preferences.pretty_backups);
        }
        None => {
            println!("Squirrel - time tracking with encrypted backups");
            println!();
            println!("Run 'squirrel --help' for usage information.");
        }
    }

    Ok(())
}
