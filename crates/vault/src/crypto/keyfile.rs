//! Session-key export and import: `{ "encryptionKey": "<passphrase>" }`.

use common::{protocol::KeyExport, VaultError};

/// Serialise `passphrase` into the key-export format.
///
/// # Errors
///
/// Returns [`VaultError::ValidationFailure`] if `passphrase` is empty.
pub fn export_key(passphrase: &str) -> Result<String, VaultError> {
    if passphrase.is_empty() {
        return Err(VaultError::ValidationFailure(
            "encryption key must not be empty".into(),
        ));
    }
    let doc = KeyExport {
        encryption_key: passphrase.to_owned(),
    };
    serde_json::to_string_pretty(&doc).map_err(|e| VaultError::Internal(e.to_string()))
}

/// Parse a key-export document and return the passphrase it carries.
///
/// # Errors
///
/// Returns [`VaultError::ImportFormat`] unless `text` is exactly an object
/// with a single non-empty string `encryptionKey`.
pub fn import_key(text: &str) -> Result<String, VaultError> {
    let doc: KeyExport = serde_json::from_str(text)
        .map_err(|_| VaultError::ImportFormat("expected {\"encryptionKey\": <text>}".into()))?;
    if doc.encryption_key.is_empty() {
        return Err(VaultError::ImportFormat("encryptionKey must not be empty".into()));
    }
    Ok(doc.encryption_key)
}
