//! Ledger export and import text.
//!
//! Export is a pretty-printed JSON array of [`RecordWire`]. Import accepts
//! the same shape and rejects the whole payload if any element is invalid.

use common::protocol::RecordWire;

use super::{record::IdentityRecord, LedgerError};

/// Serialise `records` in order. Ciphertext fields stay ciphertext.
pub fn export(records: &[IdentityRecord]) -> Result<String, LedgerError> {
    let wire = records
        .iter()
        .map(IdentityRecord::to_wire)
        .collect::<Result<Vec<_>, _>>()?;
    serde_json::to_string_pretty(&wire).map_err(|e| LedgerError::Serialise(e.to_string()))
}

/// Parse an export document into records.
///
/// # Errors
///
/// Returns [`LedgerError::ImportFormat`] naming the first offending element
/// if the text is not a JSON array or any element is not a valid record.
pub fn import(text: &str) -> Result<Vec<IdentityRecord>, LedgerError> {
    let elements: Vec<serde_json::Value> = serde_json::from_str(text)
        .map_err(|e| LedgerError::ImportFormat(format!("expected a JSON array of records: {e}")))?;

    elements
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let wire: RecordWire = serde_json::from_value(value)
                .map_err(|e| LedgerError::ImportFormat(format!("record {i}: {e}")))?;
            IdentityRecord::try_from(wire).map_err(|e| match e {
                LedgerError::ImportFormat(msg) => LedgerError::ImportFormat(format!("record {i}: {msg}")),
                other => other,
            })
        })
        .collect()
}
