//! Backup file detection and validation
//!
//! Classifies arbitrary file text as an encrypted envelope or a plain
//! backup. The branch is chosen only by the `format` literal; a document
//! carrying both the literal and plain collections is still encrypted.
//! Detection is structural and never decrypts.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{SquirrelError, SquirrelResult};
use crate::models::BackupData;

use super::format::{BackupKind, EncryptedBackupFormat, FORMAT_ID};

/// A validated backup file
#[derive(Debug, Clone, PartialEq)]
pub enum DetectedBackup {
    Encrypted(EncryptedBackupFormat),
    Plain(BackupData),
}

impl DetectedBackup {
    pub fn kind(&self) -> BackupKind {
        match self {
            DetectedBackup::Encrypted(_) => BackupKind::Encrypted,
            DetectedBackup::Plain(_) => BackupKind::Plain,
        }
    }
}

/// Detect and validate the backup in `file_text`
pub fn detect(file_text: &str) -> SquirrelResult<DetectedBackup> {
    let value: Value = serde_json::from_str(file_text).map_err(|_| SquirrelError::MalformedFile)?;
    let Value::Object(document) = value else {
        return Err(SquirrelError::MalformedFile);
    };

    let detected = if document.get("format").and_then(Value::as_str) == Some(FORMAT_ID) {
        validate_encrypted(document).map(DetectedBackup::Encrypted)
    } else {
        validate_plain(document).map(DetectedBackup::Plain)
    };

    match &detected {
        Ok(backup) => debug!(kind = %backup.kind(), "backup file recognised"),
        Err(err) => debug!(error = %err, "backup file rejected"),
    }
    detected
}

fn validate_encrypted(document: Map<String, Value>) -> SquirrelResult<EncryptedBackupFormat> {
    for field in ["version", "metadata", "crypto", "data"] {
        if is_absent(document.get(field)) {
            return Err(SquirrelError::InvalidEncryptedFormat(format!(
                "missing field `{}`",
                field
            )));
        }
    }

    // Present but mistyped envelope fields are rejected; metadata contents stay lenient
    for (field, well_typed, expected) in [
        ("version", document.get("version").is_some_and(Value::is_string), "a string"),
        ("metadata", document.get("metadata").is_some_and(Value::is_object), "an object"),
        ("data", document.get("data").is_some_and(Value::is_string), "a string"),
    ] {
        if !well_typed {
            return Err(SquirrelError::InvalidEncryptedFormat(format!(
                "`{}` is not {}",
                field, expected
            )));
        }
    }

    let crypto = document
        .get("crypto")
        .and_then(Value::as_object)
        .ok_or_else(|| SquirrelError::InvalidEncryptedFormat("`crypto` is not an object".into()))?;
    for field in ["salt", "iv", "authTag"] {
        if is_absent(crypto.get(field)) {
            return Err(SquirrelError::InvalidEncryptedFormat(format!(
                "missing field `crypto.{}`",
                field
            )));
        }
    }

    serde_json::from_value(Value::Object(document))
        .map_err(|e| SquirrelError::InvalidEncryptedFormat(e.to_string()))
}

fn validate_plain(mut document: Map<String, Value>) -> SquirrelResult<BackupData> {
    for field in ["tasks", "todos"] {
        if !matches!(document.get(field), Some(Value::Array(_))) {
            return Err(SquirrelError::InvalidPlainFormat(format!(
                "missing {} array",
                field
            )));
        }
    }

    let settings = match document.remove("settings") {
        Some(Value::Array(list)) => Value::Array(list),
        Some(Value::Object(map)) => Value::Array(
            map.into_iter()
                .map(|(id, value)| {
                    let mut entry = Map::new();
                    entry.insert("id".to_string(), Value::String(id));
                    entry.insert("value".to_string(), value);
                    Value::Object(entry)
                })
                .collect(),
        ),
        Some(_) => {
            return Err(SquirrelError::InvalidPlainFormat(
                "settings must be a list or an object".into(),
            ))
        }
        None => return Err(SquirrelError::InvalidPlainFormat("missing settings".into())),
    };
    document.insert("settings".to_string(), settings);

    serde_json::from_value(Value::Object(document))
        .map_err(|e| SquirrelError::InvalidPlainFormat(format!("invalid record: {}", e)))
}

fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
