//! Custom error types for Squirrel
//!
//! One enum covers both the backup/restore failure taxonomy and the ordinary
//! storage and configuration failures around it.

use thiserror::Error;

/// The main error type for Squirrel operations
#[derive(Error, Debug)]
pub enum SquirrelError {
    /// File content is not a JSON object
    #[error("Unrecognized backup file format: content is not a JSON object")]
    MalformedFile,

    /// Encrypted envelope is missing a required field
    #[error("Unrecognized backup file format: invalid encrypted backup ({0})")]
    InvalidEncryptedFormat(String),

    /// Plain backup is missing a required collection
    #[error("Unrecognized backup file format: invalid plain backup ({0})")]
    InvalidPlainFormat(String),

    /// Password rejected before encryption
    #[error("Password too weak: {0}")]
    WeakPassword(String),

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// An encrypted operation was attempted without a password
    #[error("A password is required for encrypted backups")]
    PasswordRequired,

    /// Wrong password or corrupted encrypted backup. Never more specific.
    #[error("Decryption failed: invalid password or corrupted backup")]
    DecryptionFailed,

    /// Unexpected failure while producing an encrypted backup
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SquirrelError {
    /// Create a "not found" error for tasks
    pub fn task_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Task",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for todos
    pub fn todo_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Todo",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// File content was rejected before any decryption was attempted
    pub fn is_unrecognized_file(&self) -> bool {
        matches!(
            self,
            Self::MalformedFile | Self::InvalidEncryptedFormat(_) | Self::InvalidPlainFormat(_)
        )
    }

    /// The caller can recover by asking for the password again
    pub fn is_recoverable_password_error(&self) -> bool {
        matches!(
            self,
            Self::WeakPassword(_)
                | Self::PasswordMismatch
                | Self::PasswordRequired
                | Self::DecryptionFailed
        )
    }
}

impl From<std::io::Error> for SquirrelError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SquirrelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Squirrel operations
pub type SquirrelResult<T> = Result<T, SquirrelError>;
