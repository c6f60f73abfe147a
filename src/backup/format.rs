//! Backup file formats
//!
//! An encrypted backup is a versioned envelope around the cipher output.
//! A plain backup is the dataset itself. File names carry the kind and the
//! creation instant.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::{
    DecryptionOptions, EncryptionResult, SecureString, CIPHER_ALGORITHM, KDF_ALGORITHM, KDF_HASH,
    KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN,
};
use crate::models::BackupData;

/// Value of the `format` field identifying an encrypted backup
pub const FORMAT_ID: &str = "squirrel-encrypted-backup";

/// Envelope schema version written by this build
pub const FORMAT_VERSION: &str = "1.0";

/// Application version recorded in new envelopes
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const PLAIN_PREFIX: &str = "squirrel-backup";
const ENCRYPTED_PREFIX: &str = "squirrel-encrypted-backup";
const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.fZ";

/// A plain backup file is the dataset with no envelope
pub type PlainBackupFormat = BackupData;

/// Key derivation parameters recorded in the envelope
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyDerivationInfo {
    pub algorithm: String,
    pub iterations: u32,
    pub hash: String,
    pub salt_length: usize,
    pub key_length: usize,
}

/// Cipher description recorded in the envelope
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncryptionInfo {
    pub algorithm: String,
    pub key_derivation: KeyDerivationInfo,
}

/// Descriptive metadata. Informational only: decryption always uses the
/// built-in constants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackupMetadata {
    /// ISO-8601 creation instant
    pub created: String,
    pub app_version: String,
    pub encryption: EncryptionInfo,
}

impl BackupMetadata {
    /// The creation instant, if it parses
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Base64 salt, nonce and tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoParams {
    pub salt: String,
    pub iv: String,
    pub auth_tag: String,
}

/// The encrypted backup file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedBackupFormat {
    /// Always [`FORMAT_ID`]
    pub format: String,
    pub version: String,
    pub metadata: BackupMetadata,
    pub crypto: CryptoParams,
    /// Base64 ciphertext without the tag
    pub data: String,

    /// Unknown top-level fields, kept for forward compatibility
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EncryptedBackupFormat {
    /// Decryption inputs for this envelope and `password`
    pub fn decryption_options(&self, password: impl Into<SecureString>) -> DecryptionOptions {
        DecryptionOptions {
            encrypted_data: self.data.clone(),
            salt: self.crypto.salt.clone(),
            iv: self.crypto.iv.clone(),
            auth_tag: self.crypto.auth_tag.clone(),
            password: password.into(),
        }
    }
}

/// Wrap a cipher result in a new envelope stamped with the current time
pub fn wrap_encrypted(result: EncryptionResult) -> EncryptedBackupFormat {
    wrap_encrypted_at(result, Utc::now())
}

/// Wrap a cipher result in a new envelope stamped with `created`
pub fn wrap_encrypted_at(result: EncryptionResult, created: DateTime<Utc>) -> EncryptedBackupFormat {
    EncryptedBackupFormat {
        format: FORMAT_ID.to_string(),
        version: FORMAT_VERSION.to_string(),
        metadata: BackupMetadata {
            created: created.to_rfc3339_opts(SecondsFormat::Millis, true),
            app_version: APP_VERSION.to_string(),
            encryption: EncryptionInfo {
                algorithm: CIPHER_ALGORITHM.to_string(),
                key_derivation: KeyDerivationInfo {
                    algorithm: KDF_ALGORITHM.to_string(),
                    iterations: PBKDF2_ITERATIONS,
                    hash: KDF_HASH.to_string(),
                    salt_length: SALT_LEN,
                    key_length: KEY_LEN,
                },
            },
        },
        crypto: CryptoParams {
            salt: result.salt,
            iv: result.iv,
            auth_tag: result.auth_tag,
        },
        data: result.encrypted_data,
        extra: serde_json::Map::new(),
    }
}

/// A plain backup is written as the dataset itself
pub fn wrap_plain(data: BackupData) -> PlainBackupFormat {
    data
}

/// Kind of backup file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupKind {
    Plain,
    Encrypted,
}

impl BackupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupKind::Plain => "plain",
            BackupKind::Encrypted => "encrypted",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            BackupKind::Plain => PLAIN_PREFIX,
            BackupKind::Encrypted => ENCRYPTED_PREFIX,
        }
    }

    /// File name for a backup of this kind created at `created`,
    /// e.g. `squirrel-backup_2025-01-02T03-04-05.678Z.json`
    pub fn file_name(&self, created: DateTime<Utc>) -> String {
        let stamp = created
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace(':', "-");
        format!("{}_{}.json", self.prefix(), stamp)
    }

    /// Recover kind and creation instant from a backup file name.
    /// Display only: detection never looks at names.
    pub fn parse_file_name(file_name: &str) -> Option<(BackupKind, DateTime<Utc>)> {
        let stem = file_name.strip_suffix(".json")?;
        let (prefix, stamp) = stem.split_once('_')?;
        let kind = match prefix {
            PLAIN_PREFIX => BackupKind::Plain,
            ENCRYPTED_PREFIX => BackupKind::Encrypted,
            _ => return None,
        };
        let naive = NaiveDateTime::parse_from_str(stamp, FILE_TIMESTAMP_FORMAT).ok()?;
        Some((kind, DateTime::from_naive_utc_and_offset(naive, Utc)))
    }
}

impl fmt::Display for BackupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_result() -> EncryptionResult {
        EncryptionResult {
            encrypted_data: "Y2lwaGVydGV4dA==".into(),
            salt: "c2FsdA==".into(),
            iv: "aXY=".into(),
            auth_tag: "dGFn".into(),
        }
    }

    #[test]
    fn test_wrap_encrypted_stamps_constants() {
        let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let envelope = wrap_encrypted_at(sample_result(), created);

        assert_eq!(envelope.format, FORMAT_ID);
        assert_eq!(envelope.version, "1.0");
        assert_eq!(envelope.metadata.created, "2025-01-02T03:04:05.000Z");
        assert_eq!(envelope.metadata.created_at(), Some(created));
        assert_eq!(envelope.metadata.app_version, APP_VERSION);
        assert_eq!(envelope.crypto.salt, "c2FsdA==");
        assert_eq!(envelope.crypto.iv, "aXY=");
        assert_eq!(envelope.crypto.auth_tag, "dGFn");
        assert_eq!(envelope.data, "Y2lwaGVydGV4dA==");
    }

    #[test]
    fn test_envelope_json_shape() {
        let envelope = wrap_encrypted(sample_result());
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["format"], "squirrel-encrypted-backup");
        assert_eq!(json["metadata"]["encryption"]["algorithm"], "AES-256-GCM");
        let kdf = &json["metadata"]["encryption"]["keyDerivation"];
        assert_eq!(kdf["algorithm"], "PBKDF2");
        assert_eq!(kdf["iterations"], 100000);
        assert_eq!(kdf["hash"], "SHA-256");
        assert_eq!(kdf["saltLength"], 32);
        assert_eq!(kdf["keyLength"], 32);
        assert!(json["metadata"]["appVersion"].is_string());
        assert!(json["crypto"]["authTag"].is_string());
    }

    #[test]
    fn test_decryption_options_copy_envelope_fields() {
        let envelope = wrap_encrypted(sample_result());
        let options = envelope.decryption_options("pw");
        assert_eq!(options.encrypted_data, envelope.data);
        assert_eq!(options.salt, envelope.crypto.salt);
        assert_eq!(options.iv, envelope.crypto.iv);
        assert_eq!(options.auth_tag, envelope.crypto.auth_tag);
        assert_eq!(options.password.as_str(), "pw");
    }

    #[test]
    fn test_file_names() {
        let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(678);

        let plain = BackupKind::Plain.file_name(created);
        let encrypted = BackupKind::Encrypted.file_name(created);
        assert_eq!(plain, "squirrel-backup_2025-01-02T03-04-05.678Z.json");
        assert_eq!(encrypted, "squirrel-encrypted-backup_2025-01-02T03-04-05.678Z.json");

        assert_eq!(
            BackupKind::parse_file_name(&plain),
            Some((BackupKind::Plain, created))
        );
        assert_eq!(
            BackupKind::parse_file_name(&encrypted),
            Some((BackupKind::Encrypted, created))
        );
    }

    #[test]
    fn test_unrelated_file_names_are_ignored() {
        assert!(BackupKind::parse_file_name("notes.json").is_none());
        assert!(BackupKind::parse_file_name("squirrel-backup_yesterday.json").is_none());
        assert!(BackupKind::parse_file_name("squirrel-backup_2025-01-02T03-04-05.678Z.txt").is_none());
    }
}
