//! Wire types: the ledger export format, the key-export format, and the
//! request and response bodies of the HTTP API.
//!
//! Field names follow the export files produced by the identity form
//! (`dob`, `aadhar`, `txHash`), so previously exported ledgers import
//! unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel stored when no gender label was supplied.
pub const UNSPECIFIED_GENDER: &str = "unspecified";

fn default_gender() -> String {
    UNSPECIFIED_GENDER.into()
}

// ---------------------------------------------------------------------------
// Ledger export format
// ---------------------------------------------------------------------------

/// Confirmation state of an identity record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    #[default]
    Pending,
    Verified,
}

/// One element of an exported ledger.
///
/// `aadhar` always carries ciphertext. `metadata` is itself a JSON document
/// encoded as text; see [`MetadataBlob`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordWire {
    pub name: String,
    pub email: String,
    pub dob: String,
    pub aadhar: String,
    #[serde(default = "default_gender")]
    pub gender: String,
    pub metadata: String,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(rename = "txHash", default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// Decoded form of [`RecordWire::metadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataBlob {
    /// Free-text note attached to the record.
    #[serde(default)]
    pub additional: Option<String>,
    /// Caller-defined attribute pairs.
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
}

impl MetadataBlob {
    /// Encode as the text blob stored in [`RecordWire::metadata`].
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a metadata text blob. The blob must be a JSON object.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

// ---------------------------------------------------------------------------
// Key export format
// ---------------------------------------------------------------------------

/// Exported session key: `{ "encryptionKey": "<passphrase>" }`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyExport {
    #[serde(rename = "encryptionKey")]
    pub encryption_key: String,
}

impl std::fmt::Debug for KeyExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyExport([REDACTED])")
    }
}

// ---------------------------------------------------------------------------
// Identifier endpoints
// ---------------------------------------------------------------------------

/// Request body for `POST /identifiers/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub identifier: String,
}

/// Response body for `POST /identifiers/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

/// Request body for `POST /identifiers/check-digit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDigitRequest {
    /// The first eleven digits of an identifier.
    pub partial: String,
}

/// Response body for `POST /identifiers/check-digit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDigitResponse {
    pub digit: u8,
}

// ---------------------------------------------------------------------------
// Field cipher endpoints
// ---------------------------------------------------------------------------

/// Request body for `POST /fields/encrypt`.
#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptFieldRequest {
    pub plaintext: String,
    pub key: String,
}

/// Response body for `POST /fields/encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptFieldResponse {
    pub ciphertext: String,
}

/// Request body for `POST /fields/decrypt`.
#[derive(Clone, Serialize, Deserialize)]
pub struct DecryptFieldRequest {
    pub ciphertext: String,
    pub key: String,
}

/// Response body for `POST /fields/decrypt`.
///
/// `plaintext` is `null` when the field cannot currently be displayed.
#[derive(Clone, Serialize, Deserialize)]
pub struct DecryptFieldResponse {
    pub plaintext: Option<String>,
}

// ---------------------------------------------------------------------------
// Record endpoints
// ---------------------------------------------------------------------------

/// One custom attribute row as entered on the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributePair {
    pub key: String,
    pub value: String,
}

/// Request body for `POST /records` and `PUT /records/{index}`.
///
/// `national_id` is the raw identifier; it is validated and sealed under
/// `key` before anything reaches the ledger.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSubmission {
    pub name: String,
    pub email: String,
    pub dob: String,
    pub national_id: String,
    pub key: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub custom: Vec<AttributePair>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// Response body for `POST /records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendResponse {
    pub index: usize,
}

/// Query string for `GET /records`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

/// A record together with its current ledger index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub index: usize,
    pub record: RecordWire,
}

/// Response body for `GET /records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub page: usize,
    pub total_pages: usize,
    pub items: Vec<IndexedRecord>,
}

/// Request body for `POST /keys/export`.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyExportRequest {
    pub key: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"out_of_range"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::VaultError> for ErrorResponse {
    fn from(err: &crate::VaultError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` once the server is accepting requests.
    pub status: String,
    /// Number of records currently in the ledger.
    pub records: usize,
}
