//! National-identifier checksum validation.
//!
//! Identifiers are exactly 12 ASCII decimal digits whose last digit is a
//! Verhoeff check digit over the first eleven. See [`verhoeff`] for the
//! tables and the digit walk.
//!
//! # Module invariants
//!
//! - Pure and total: no input panics, allocates a result, or touches state.
//! - No crypto dependencies. Sealing a validated identifier is the job of
//!   `crate::crypto`.

pub mod verhoeff;

use thiserror::Error;

pub use verhoeff::{check_digit, is_valid};

/// Number of digits in a national identifier.
pub const IDENTIFIER_LEN: usize = 12;

/// Reasons an identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("identifier must be exactly {IDENTIFIER_LEN} digits, got {0} characters")]
    WrongLength(usize),

    #[error("identifier must contain only the digits 0-9")]
    NonDigit,

    #[error("identifier checksum does not match")]
    ChecksumMismatch,
}

/// Typed form of [`is_valid`] that names why an identifier was rejected.
///
/// # Errors
///
/// Returns the first [`ValidationError`] that applies: length is checked
/// before character class, character class before the checksum.
pub fn validate(identifier: &str) -> Result<(), ValidationError> {
    let len = identifier.chars().count();
    if len != IDENTIFIER_LEN {
        return Err(ValidationError::WrongLength(len));
    }
    if !identifier.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NonDigit);
    }
    if !is_valid(identifier) {
        return Err(ValidationError::ChecksumMismatch);
    }
    Ok(())
}
