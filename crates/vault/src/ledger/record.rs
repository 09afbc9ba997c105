//! [`IdentityRecord`]: the unit of storage, and its export-format mapping.

use std::collections::BTreeMap;

use common::protocol::{MetadataBlob, RecordStatus, RecordWire, UNSPECIFIED_GENDER};

use super::LedgerError;
use crate::crypto::SealedId;

/// Caller-defined attribute pairs.
///
/// Keys are unique. Pairs with an empty key or an empty value are dropped on
/// the way in, so the map never holds either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomAttributes(BTreeMap<String, String>);

impl CustomAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from form rows. A later row with the same key replaces an
    /// earlier one.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut attrs = Self::new();
        for (k, v) in pairs {
            attrs.insert(k, v);
        }
        attrs
    }

    /// Insert a pair, ignoring it if either side is empty.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        if key.is_empty() || value.is_empty() {
            return;
        }
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One identity held by the ledger.
///
/// `national_id` is always ciphertext. `name`, `email`, and `date_of_birth`
/// are never empty and `gender` is never empty (it falls back to
/// [`UNSPECIFIED_GENDER`]), so every record the ledger holds survives an
/// export/import cycle unchanged. `external_ref` is fixed when the record is
/// created; [`super::Ledger::update_at`] carries it over to the replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    name: String,
    email: String,
    date_of_birth: String,
    pub national_id: SealedId,
    gender: String,
    pub custom_attributes: CustomAttributes,
    pub note: Option<String>,
    pub status: RecordStatus,
    external_ref: Option<String>,
}

/// Name of the first empty value in `fields`, if any.
fn first_empty<'a>(fields: &[(&'a str, &str)]) -> Option<&'a str> {
    fields
        .iter()
        .find(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
}

impl IdentityRecord {
    /// Create a `Pending` record with no gender label, attributes, or note.
    ///
    /// Fails with [`LedgerError::InvalidRecord`] if `name`, `email`, or
    /// `date_of_birth` is empty.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        date_of_birth: impl Into<String>,
        national_id: SealedId,
    ) -> Result<Self, LedgerError> {
        let (name, email, date_of_birth) = (name.into(), email.into(), date_of_birth.into());
        if let Some(field) = first_empty(&[
            ("name", name.as_str()),
            ("email", email.as_str()),
            ("dob", date_of_birth.as_str()),
        ]) {
            return Err(LedgerError::InvalidRecord(format!("`{field}` must not be empty")));
        }
        Ok(Self {
            name,
            email,
            date_of_birth,
            national_id,
            gender: UNSPECIFIED_GENDER.into(),
            custom_attributes: CustomAttributes::new(),
            note: None,
            status: RecordStatus::Pending,
            external_ref: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Opaque date string as entered by the caller.
    pub fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Set the gender label; an empty label leaves the sentinel in place.
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        let gender = gender.into();
        if !gender.is_empty() {
            self.gender = gender;
        }
        self
    }

    pub fn with_attributes(mut self, attrs: CustomAttributes) -> Self {
        self.custom_attributes = attrs;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_external_ref(mut self, external_ref: impl Into<String>) -> Self {
        self.external_ref = Some(external_ref.into());
        self
    }

    /// Settlement reference recorded at creation, if any.
    pub fn external_ref(&self) -> Option<&str> {
        self.external_ref.as_deref()
    }

    pub(crate) fn inherit_external_ref(&mut self, from: &IdentityRecord) {
        self.external_ref = from.external_ref.clone();
    }

    /// Map to the export format. `national_id` stays ciphertext.
    pub fn to_wire(&self) -> Result<RecordWire, LedgerError> {
        let blob = MetadataBlob {
            additional: self.note.clone(),
            custom: self.custom_attributes.0.clone(),
        };
        let metadata = blob
            .encode()
            .map_err(|e| LedgerError::Serialise(e.to_string()))?;
        Ok(RecordWire {
            name: self.name.clone(),
            email: self.email.clone(),
            dob: self.date_of_birth.clone(),
            aadhar: self.national_id.as_str().to_owned(),
            gender: self.gender.clone(),
            metadata,
            status: self.status,
            tx_hash: self.external_ref.clone(),
        })
    }
}

impl TryFrom<RecordWire> for IdentityRecord {
    type Error = LedgerError;

    /// Rebuild a record from the export format.
    ///
    /// The required text fields must be non-empty and `metadata` must decode
    /// to a metadata object.
    fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
        if let Some(field) = first_empty(&[
            ("name", wire.name.as_str()),
            ("email", wire.email.as_str()),
            ("dob", wire.dob.as_str()),
            ("aadhar", wire.aadhar.as_str()),
            ("metadata", wire.metadata.as_str()),
        ]) {
            return Err(LedgerError::ImportFormat(format!("`{field}` must not be empty")));
        }
        let blob = MetadataBlob::decode(&wire.metadata)
            .map_err(|e| LedgerError::ImportFormat(format!("invalid metadata blob: {e}")))?;

        Ok(Self {
            name: wire.name,
            email: wire.email,
            date_of_birth: wire.dob,
            national_id: SealedId::from_ciphertext(wire.aadhar),
            gender: if wire.gender.is_empty() {
                UNSPECIFIED_GENDER.into()
            } else {
                wire.gender
            },
            custom_attributes: CustomAttributes::from_pairs(blob.custom),
            note: blob.additional,
            status: wire.status,
            external_ref: wire.tx_hash,
        })
    }
}
