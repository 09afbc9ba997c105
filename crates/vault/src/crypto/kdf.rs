//! Passphrase-to-key derivation (PBKDF2-HMAC-SHA256, RFC 8018).

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::cipher::{CipherError, KEY_LEN};

type HmacSha256 = Hmac<Sha256>;

/// Byte length of the random per-ciphertext salt.
pub const SALT_LEN: usize = 16;

/// PBKDF2 iteration count for `v1` ciphertexts.
pub const ITERATIONS: u32 = 10_000;

/// A derived AES-256 key.
///
/// The bytes are overwritten with zeroes on drop and never printed.
pub struct DerivedKey(Box<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the `v1` cipher key for `passphrase` and `salt`.
///
/// # Errors
///
/// Returns [`CipherError::KeyDerivation`] if the HMAC cannot be keyed.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<DerivedKey, CipherError> {
    pbkdf2_sha256(passphrase.as_bytes(), salt, ITERATIONS)
}

/// PBKDF2 with HMAC-SHA256 producing exactly one 32-byte block.
///
/// SHA-256 output is [`KEY_LEN`] bytes, so the first block is the whole key.
fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32) -> Result<DerivedKey, CipherError> {
    let prf = HmacSha256::new_from_slice(password).map_err(|_| CipherError::KeyDerivation)?;

    let mut mac = prf.clone();
    mac.update(salt);
    mac.update(&1u32.to_be_bytes());
    let mut u = mac.finalize().into_bytes();

    let mut out = Box::new([0u8; KEY_LEN]);
    out.copy_from_slice(&u);

    for _ in 1..iterations {
        let mut mac = prf.clone();
        mac.update(&u);
        u = mac.finalize().into_bytes();
        out.iter_mut().zip(u.iter()).for_each(|(o, b)| *o ^= b);
    }

    Ok(DerivedKey(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn rfc7914_single_iteration_vector() {
        let key = pbkdf2_sha256(b"passwd", b"salt", 1).unwrap();
        assert_eq!(
            hex(key.as_bytes()),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn multi_iteration_vector() {
        let key = pbkdf2_sha256(b"password", b"salt", 4096).unwrap();
        assert_eq!(
            hex(key.as_bytes()),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn salt_changes_key() {
        let a = derive_key("same passphrase", &[1u8; SALT_LEN]).unwrap();
        let b = derive_key("same passphrase", &[2u8; SALT_LEN]).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn derived_key_redacted_in_debug() {
        let key = derive_key("hunter2", &[0u8; SALT_LEN]).unwrap();
        assert!(format!("{key:?}").contains("REDACTED"));
    }
}
