//! Cryptographic capabilities
//!
//! The encryption pipeline only needs four primitives. [`CipherProvider`]
//! names them so the pipeline can be driven by something other than the
//! system implementation, e.g. a provider whose random source fails.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};

use crate::error::{SquirrelError, SquirrelResult};

use super::key_derivation::{derive_key, DerivedKey};
use super::IV_LEN;

/// Primitives used by backup encryption
pub trait CipherProvider {
    /// Fill `buf` from a cryptographically secure random source
    fn random_bytes(&self, buf: &mut [u8]) -> SquirrelResult<()>;

    /// Derive the symmetric key for `password` and `salt`
    fn derive_key(&self, password: &str, salt: &[u8]) -> DerivedKey;

    /// Encrypt, returning ciphertext with the tag appended
    fn aead_encrypt(
        &self,
        key: &DerivedKey,
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
    ) -> SquirrelResult<Vec<u8>>;

    /// Authenticate and decrypt ciphertext with the tag appended
    fn aead_decrypt(
        &self,
        key: &DerivedKey,
        iv: &[u8; IV_LEN],
        sealed: &[u8],
    ) -> SquirrelResult<Vec<u8>>;
}

/// OS randomness, PBKDF2-HMAC-SHA256 and AES-256-GCM
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCipher;

impl CipherProvider for SystemCipher {
    fn random_bytes(&self, buf: &mut [u8]) -> SquirrelResult<()> {
        OsRng.try_fill_bytes(buf).map_err(|e| {
            SquirrelError::EncryptionFailed(format!("Secure random source unavailable: {}", e))
        })
    }

    fn derive_key(&self, password: &str, salt: &[u8]) -> DerivedKey {
        derive_key(password, salt)
    }

    fn aead_encrypt(
        &self,
        key: &DerivedKey,
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
    ) -> SquirrelResult<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| SquirrelError::EncryptionFailed(format!("Failed to create cipher: {}", e)))?;

        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| SquirrelError::EncryptionFailed(format!("Encryption failed: {}", e)))
    }

    fn aead_decrypt(
        &self,
        key: &DerivedKey,
        iv: &[u8; IV_LEN],
        sealed: &[u8],
    ) -> SquirrelResult<Vec<u8>> {
        let cipher =
            Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| SquirrelError::DecryptionFailed)?;

        cipher
            .decrypt(Nonce::from_slice(iv), sealed)
            .map_err(|_| SquirrelError::DecryptionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::TAG_LEN;

    fn key() -> DerivedKey {
        SystemCipher.derive_key("test_password", &[0u8; 32])
    }

    #[test]
    fn test_random_bytes_differ() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        SystemCipher.random_bytes(&mut a).unwrap();
        SystemCipher.random_bytes(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_sealed_output_carries_tag() {
        let sealed = SystemCipher
            .aead_encrypt(&key(), &[1u8; IV_LEN], b"Hello, World!")
            .unwrap();
        assert_eq!(sealed.len(), b"Hello, World!".len() + TAG_LEN);

        let opened = SystemCipher.aead_decrypt(&key(), &[1u8; IV_LEN], &sealed).unwrap();
        assert_eq!(opened, b"Hello, World!");
    }

    #[test]
    fn test_wrong_nonce_fails_authentication() {
        let sealed = SystemCipher.aead_encrypt(&key(), &[1u8; IV_LEN], b"data").unwrap();
        let result = SystemCipher.aead_decrypt(&key(), &[2u8; IV_LEN], &sealed);
        assert!(matches!(result, Err(SquirrelError::DecryptionFailed)));
    }

    #[test]
    fn test_truncated_input_fails() {
        let result = SystemCipher.aead_decrypt(&key(), &[1u8; IV_LEN], &[0u8; 4]);
        assert!(matches!(result, Err(SquirrelError::DecryptionFailed)));
    }
}
