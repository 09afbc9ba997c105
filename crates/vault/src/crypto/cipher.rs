//! AES-256-GCM-SIV encryption and decryption of individual text fields under
//! a caller-supplied passphrase.
//!
//! Each ciphertext embeds its own random salt and nonce, so the passphrase
//! alone is enough to decrypt it. Nothing here holds state between calls.

use std::str::FromStr;

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng},
    Aes256GcmSiv, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

use super::kdf::{derive_key, SALT_LEN};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Prefix that appears at the start of every encrypted field value.
pub const VERSION_PREFIX: &str = "v1";

/// A parsed, encrypted field value.
///
/// The string representation is
/// `v1.<base64url(salt)>.<base64url(nonce)>.<base64url(ciphertext+tag)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedField {
    /// PBKDF2 salt used to derive the key from the passphrase.
    pub salt: [u8; SALT_LEN],
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl EncryptedField {
    /// Encode this value to its canonical string representation.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.salt),
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }
}

impl FromStr for EncryptedField {
    type Err = CipherError;

    /// Parse an encrypted field string back into an [`EncryptedField`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(4, '.').collect();
        if parts.len() != 4 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::InvalidFormat);
        }
        let salt = decode_fixed::<SALT_LEN>(parts[1])?;
        let nonce = decode_fixed::<NONCE_LEN>(parts[2])?;
        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[3])
            .map_err(|_| CipherError::InvalidFormat)?;

        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }
}

fn decode_fixed<const N: usize>(part: &str) -> Result<[u8; N], CipherError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|_| CipherError::InvalidFormat)?;
    bytes.try_into().map_err(|_| CipherError::InvalidFormat)
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The passphrase was empty.
    #[error("encryption key must not be empty")]
    EmptyKey,

    /// The passphrase could not be turned into a key.
    #[error("key derivation failed")]
    KeyDerivation,

    /// AES-GCM-SIV encryption or decryption failed.
    #[error("aead operation failed")]
    AeadFailure,

    /// The encrypted field string does not match the expected format.
    #[error("invalid encrypted field format")]
    InvalidFormat,

    /// The plaintext could not be serialised, or the recovered bytes were
    /// not a JSON string.
    #[error("field payload is not a JSON string")]
    Payload,
}

/// Encrypt a text field under `passphrase`.
///
/// The plaintext is serialised as a JSON string before encryption. A fresh
/// random salt and nonce are drawn from the OS CSPRNG on every call, so
/// encrypting the same value twice yields different ciphertexts.
///
/// # Errors
///
/// Returns [`CipherError::EmptyKey`] if `passphrase` is empty.
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (should be
/// unreachable with a valid key and nonce).
pub fn encrypt_field(plaintext: &str, passphrase: &str) -> Result<EncryptedField, CipherError> {
    if passphrase.is_empty() {
        return Err(CipherError::EmptyKey);
    }
    let payload = serde_json::to_vec(plaintext).map_err(|_| CipherError::Payload)?;

    use aes_gcm_siv::aead::rand_core::RngCore;
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let cipher = build_cipher(passphrase, &salt)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), payload.as_ref())
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(EncryptedField {
        salt,
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypt an [`EncryptedField`] back to its plaintext text.
///
/// # Errors
///
/// Returns [`CipherError::EmptyKey`] if `passphrase` is empty.
/// Returns [`CipherError::AeadFailure`] if authentication fails (wrong key or tampered data).
/// Returns [`CipherError::Payload`] if the recovered bytes are not a JSON string.
pub fn decrypt_field(field: &EncryptedField, passphrase: &str) -> Result<String, CipherError> {
    if passphrase.is_empty() {
        return Err(CipherError::EmptyKey);
    }
    let cipher = build_cipher(passphrase, &field.salt)?;
    let payload = cipher
        .decrypt(Nonce::from_slice(&field.nonce), field.ciphertext.as_ref())
        .map_err(|_| CipherError::AeadFailure)?;
    serde_json::from_slice::<String>(&payload).map_err(|_| CipherError::Payload)
}

/// Encrypt `plaintext` and return the ciphertext text form.
///
/// # Errors
///
/// See [`encrypt_field`].
pub fn encrypt_text(plaintext: &str, passphrase: &str) -> Result<String, CipherError> {
    encrypt_field(plaintext, passphrase).map(|f| f.to_string_repr())
}

/// Recover the plaintext of a ciphertext text form, or `None` if it cannot
/// currently be displayed: malformed input, wrong key, or an empty key.
pub fn decrypt_text(ciphertext: &str, passphrase: &str) -> Option<String> {
    let field = EncryptedField::from_str(ciphertext).ok()?;
    decrypt_field(&field, passphrase).ok()
}

fn build_cipher(passphrase: &str, salt: &[u8]) -> Result<Aes256GcmSiv, CipherError> {
    let key = derive_key(passphrase, salt)?;
    Aes256GcmSiv::new_from_slice(key.as_bytes()).map_err(|_| CipherError::KeyDerivation)
}
