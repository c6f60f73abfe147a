//! Display formatting for terminal output
//!
//! Plain-text tables and summaries for tasks, todos and backups.

pub mod backup;
pub mod task;
pub mod todo;

pub use backup::{format_backup_list, format_inspection, format_size, format_strength};
pub use task::{format_duration, format_task_list};
pub use todo::format_todo_list;
