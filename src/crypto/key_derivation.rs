//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives the AES-256 key from the user's password and a per-backup salt.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{KEY_LEN, PBKDF2_ITERATIONS};

/// A derived encryption key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the backup key for `password` and `salt`
pub fn derive_key(password: &str, salt: &[u8]) -> DerivedKey {
    derive_with_rounds(password, salt, PBKDF2_ITERATIONS)
}

fn derive_with_rounds(password: &str, salt: &[u8], rounds: u32) -> DerivedKey {
    let mut key = DerivedKey { key: [0u8; KEY_LEN] };
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut key.key);
    key
}
