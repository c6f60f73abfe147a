//! Cryptographic functions for Squirrel
//!
//! Provides AES-256-GCM encryption of backup data with a key derived from the
//! user's password by PBKDF2-HMAC-SHA256.
//!
//! The constants below are part of the version "1.0" backup file contract.
//! Changing any of them requires a new format version.

pub mod encryption;
pub mod key_derivation;
pub mod provider;
pub mod secure_memory;
pub mod strength;

pub use encryption::{decrypt, decrypt_with, encrypt, encrypt_with, DecryptionOptions, EncryptionResult};
pub use key_derivation::{derive_key, DerivedKey};
pub use provider::{CipherProvider, SystemCipher};
pub use secure_memory::SecureString;
pub use strength::{evaluate, PasswordStrengthResult, Requirements, StrengthLabel};

/// AEAD cipher name recorded in backup metadata
pub const CIPHER_ALGORITHM: &str = "AES-256-GCM";

/// Key derivation function name recorded in backup metadata
pub const KDF_ALGORITHM: &str = "PBKDF2";

/// Hash underlying the key derivation HMAC
pub const KDF_HASH: &str = "SHA-256";

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes
pub const SALT_LEN: usize = 32;

/// AES-GCM nonce length in bytes (96 bits)
pub const IV_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;
