//! Configuration module for Squirrel
//!
//! - Path resolution for data, backups and preferences
//! - Tool preferences persistence

pub mod paths;
pub mod preferences;

pub use paths::SquirrelPaths;
pub use preferences::Preferences;
