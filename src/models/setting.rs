//! Setting model
//!
//! Settings are free-form key/value pairs. Values keep their JSON type so a
//! restored backup reproduces them exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Setting id for the "remind me to back up on close" preference
pub const BACKUP_ON_CLOSE: &str = "backupOnClose";

/// A setting value: boolean, number or string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl SettingValue {
    /// Interpret a command-line string: `true`/`false`, then numbers, then text
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(number) = raw.parse::<serde_json::Number>() {
            return Self::Number(number);
        }
        Self::Text(raw.to_string())
    }

    /// The value as a boolean, if it is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// A single setting entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Unique key
    pub id: String,

    /// Stored value
    pub value: SettingValue,
}

impl Setting {
    /// Create a new setting
    pub fn new(id: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}
