//! Common error types shared across crates.

use thiserror::Error;

/// Top-level error type for every identity-vault operation.
///
/// None of these are fatal: each one is reported to the caller and the
/// operation that produced it leaves prior state untouched.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`VaultError::ValidationFailure`] → 422
/// - [`VaultError::CipherFailure`] → 422
/// - [`VaultError::OutOfRange`] → 404
/// - [`VaultError::ImportFormat`] → 400
/// - [`VaultError::BadRequest`] → 400
/// - [`VaultError::Internal`] → 500
#[derive(Debug, Error)]
pub enum VaultError {
    /// An identifier failed the shape or checksum test, or a required input
    /// (such as the passphrase) was empty.
    #[error("validation failure: {0}")]
    ValidationFailure(String),

    /// A protected field could not be encrypted or recovered.
    #[error("cipher failure: {0}")]
    CipherFailure(String),

    /// An index-addressed operation named a record that does not exist.
    #[error("index {index} out of range for ledger of {len} records")]
    OutOfRange { index: usize, len: usize },

    /// An import payload was not a well-formed sequence of records.
    #[error("import format error: {0}")]
    ImportFormat(String),

    /// The request was malformed before reaching the core.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VaultError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            VaultError::ValidationFailure(_) => 422,
            VaultError::CipherFailure(_) => 422,
            VaultError::OutOfRange { .. } => 404,
            VaultError::ImportFormat(_) => 400,
            VaultError::BadRequest(_) => 400,
            VaultError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            VaultError::ValidationFailure(_) => "validation_failure",
            VaultError::CipherFailure(_) => "cipher_failure",
            VaultError::OutOfRange { .. } => "out_of_range",
            VaultError::ImportFormat(_) => "import_format_error",
            VaultError::BadRequest(_) => "bad_request",
            VaultError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(VaultError::ValidationFailure("x".into()).http_status(), 422);
        assert_eq!(VaultError::CipherFailure("x".into()).http_status(), 422);
        assert_eq!(VaultError::OutOfRange { index: 3, len: 1 }.http_status(), 404);
        assert_eq!(VaultError::ImportFormat("x".into()).http_status(), 400);
        assert_eq!(VaultError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(VaultError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(VaultError::ImportFormat("x".into()).code(), "import_format_error");
        assert_eq!(VaultError::OutOfRange { index: 0, len: 0 }.code(), "out_of_range");
    }

    #[test]
    fn display_includes_message() {
        let e = VaultError::OutOfRange { index: 7, len: 2 };
        let msg = e.to_string();
        assert!(msg.contains('7') && msg.contains('2'), "{msg}");
    }
}
