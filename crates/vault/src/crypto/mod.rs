//! AES-256-GCM-SIV field encryption under a passphrase-derived key.
//!
//! This module is free of ledger and HTTP dependencies. It provides the
//! encrypt/decrypt pair for single text fields, the sealing step that turns
//! a raw national identifier into ledger-safe ciphertext, and the key-file
//! format used to move a session key between devices.
//!
//! # Ciphertext format
//!
//! ```text
//! v1.<b64url(salt)>.<b64url(nonce)>.<b64url(ciphertext+tag)>
//! ```
//!
//! The `v1` prefix fixes the KDF (PBKDF2-HMAC-SHA256, 10 000 rounds) and the
//! AEAD, and leaves room for migration without breaking existing ciphertext.

pub mod cipher;
pub mod kdf;
pub mod keyfile;

use common::VaultError;
use serde::Serialize;

use crate::checksum;

pub use cipher::{decrypt_text, encrypt_text, CipherError};

/// Ciphertext of a national identifier.
///
/// Constructed only by [`seal_identifier`] or by trusting an imported
/// ciphertext, so a ledger holding `SealedId`s never holds plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SealedId(String);

impl SealedId {
    /// Wrap ciphertext read back from an export file.
    pub(crate) fn from_ciphertext(ciphertext: String) -> Self {
        Self(ciphertext)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the identifier, or `None` if `passphrase` cannot open it.
    pub fn reveal(&self, passphrase: &str) -> Option<String> {
        decrypt_text(&self.0, passphrase)
    }
}

/// Validate a raw identifier and encrypt it under `passphrase`.
///
/// # Errors
///
/// Returns [`VaultError::ValidationFailure`] if the identifier fails the
/// checksum or the passphrase is empty; nothing is encrypted in that case.
/// Returns [`VaultError::CipherFailure`] if encryption itself fails.
pub fn seal_identifier(raw: &str, passphrase: &str) -> Result<SealedId, VaultError> {
    checksum::validate(raw).map_err(|e| VaultError::ValidationFailure(e.to_string()))?;
    encrypt_text(raw, passphrase)
        .map(SealedId)
        .map_err(cipher_error)
}

/// Map a cipher error onto the shared taxonomy.
///
/// An empty passphrase is a caller error and reported as a validation
/// failure; everything else is a cipher failure.
pub fn cipher_error(err: CipherError) -> VaultError {
    match err {
        CipherError::EmptyKey => VaultError::ValidationFailure(err.to_string()),
        other => VaultError::CipherFailure(other.to_string()),
    }
}
