//! Core data models for Squirrel
//!
//! Settings, tracked tasks, todos, and the snapshot that bundles them for
//! backup and restore.

pub mod backup_data;
pub mod setting;
pub mod task;
pub mod todo;

pub use backup_data::BackupData;
pub use setting::{Setting, SettingValue, BACKUP_ON_CLOSE};
pub use task::Task;
pub use todo::Todo;
