//! Backup data encryption/decryption
//!
//! Every encryption draws a fresh salt and nonce, so the same data and
//! password never produce the same output twice. Decryption reports every
//! failure as [`SquirrelError::DecryptionFailed`] and does the same amount of
//! work whichever input was bad.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{SquirrelError, SquirrelResult};
use crate::models::BackupData;

use super::provider::{CipherProvider, SystemCipher};
use super::secure_memory::SecureString;
use super::{IV_LEN, SALT_LEN, TAG_LEN};

/// Base64-encoded output of one encryption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionResult {
    /// Ciphertext without the tag
    pub encrypted_data: String,
    /// 32-byte PBKDF2 salt
    pub salt: String,
    /// 12-byte AES-GCM nonce
    pub iv: String,
    /// 16-byte AES-GCM authentication tag
    pub auth_tag: String,
}

/// Everything needed to decrypt a backup
#[derive(Debug, Clone)]
pub struct DecryptionOptions {
    pub encrypted_data: String,
    pub salt: String,
    pub iv: String,
    pub auth_tag: String,
    pub password: SecureString,
}

impl DecryptionOptions {
    /// Pair an encryption result with the password to open it
    pub fn new(result: EncryptionResult, password: impl Into<SecureString>) -> Self {
        Self {
            encrypted_data: result.encrypted_data,
            salt: result.salt,
            iv: result.iv,
            auth_tag: result.auth_tag,
            password: password.into(),
        }
    }
}

/// Encrypt `data` under `password` with the system cipher
pub fn encrypt(data: &BackupData, password: &str) -> SquirrelResult<EncryptionResult> {
    encrypt_with(&SystemCipher, data, password)
}

/// Encrypt `data` under `password` using `provider`
pub fn encrypt_with<P: CipherProvider>(
    provider: &P,
    data: &BackupData,
    password: &str,
) -> SquirrelResult<EncryptionResult> {
    let plaintext = Zeroizing::new(serde_json::to_vec(data).map_err(|e| {
        SquirrelError::EncryptionFailed(format!("Failed to serialize backup data: {}", e))
    })?);

    let mut salt = [0u8; SALT_LEN];
    provider.random_bytes(&mut salt)?;
    let mut iv = [0u8; IV_LEN];
    provider.random_bytes(&mut iv)?;

    let key = provider.derive_key(password, &salt);
    let mut ciphertext = provider.aead_encrypt(&key, &iv, &plaintext)?;

    if ciphertext.len() < TAG_LEN {
        return Err(SquirrelError::EncryptionFailed(
            "Cipher output shorter than the authentication tag".to_string(),
        ));
    }
    let auth_tag = ciphertext.split_off(ciphertext.len() - TAG_LEN);

    Ok(EncryptionResult {
        encrypted_data: STANDARD.encode(&ciphertext),
        salt: STANDARD.encode(salt),
        iv: STANDARD.encode(iv),
        auth_tag: STANDARD.encode(&auth_tag),
    })
}

/// Decrypt a backup with the system cipher
pub fn decrypt(options: &DecryptionOptions) -> SquirrelResult<BackupData> {
    decrypt_with(&SystemCipher, options)
}

/// Decrypt a backup using `provider`
pub fn decrypt_with<P: CipherProvider>(
    provider: &P,
    options: &DecryptionOptions,
) -> SquirrelResult<BackupData> {
    // Malformed fields are replaced by zeros and remembered, so key
    // derivation and authentication still run before the uniform error.
    let mut well_formed = true;
    let salt: [u8; SALT_LEN] = decode_fixed(&options.salt, &mut well_formed);
    let iv: [u8; IV_LEN] = decode_fixed(&options.iv, &mut well_formed);
    let auth_tag: [u8; TAG_LEN] = decode_fixed(&options.auth_tag, &mut well_formed);
    let mut sealed = STANDARD
        .decode(&options.encrypted_data)
        .unwrap_or_else(|_| {
            well_formed = false;
            Vec::new()
        });
    sealed.extend_from_slice(&auth_tag);

    let key = provider.derive_key(options.password.as_str(), &salt);
    let opened = provider.aead_decrypt(&key, &iv, &sealed);

    match opened {
        Ok(plaintext) if well_formed => {
            let plaintext = Zeroizing::new(plaintext);
            serde_json::from_slice(&plaintext).map_err(|_| SquirrelError::DecryptionFailed)
        }
        _ => Err(SquirrelError::DecryptionFailed),
    }
}

fn decode_fixed<const N: usize>(encoded: &str, well_formed: &mut bool) -> [u8; N] {
    let mut out = [0u8; N];
    match STANDARD.decode(encoded) {
        Ok(bytes) if bytes.len() == N => out.copy_from_slice(&bytes),
        _ => *well_formed = false,
    }
    out
}
