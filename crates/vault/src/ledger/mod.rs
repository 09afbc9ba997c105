//! The identity ledger: an ordered, index-addressed collection of
//! [`IdentityRecord`]s with search, pagination, and export/import.
//!
//! # Module invariants
//!
//! - A record's identity is its position. Edits replace in place; removal
//!   shifts every later index down by one.
//! - `national_id` is always ciphertext ([`crate::crypto::SealedId`]); the
//!   ledger never decrypts.
//! - Every fallible operation checks before it mutates, so a failure leaves
//!   the ledger exactly as it was.
//! - Search, pagination, and export never mutate records.

pub mod codec;
pub mod record;
pub mod store;
pub mod view;

pub use record::{CustomAttributes, IdentityRecord};
pub use store::LedgerStore;
pub use view::{Page, ViewState, DEFAULT_PAGE_SIZE};

use common::VaultError;
use thiserror::Error;
use tracing::debug;

/// Errors produced by the ledger layer.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The named index is not a current position.
    #[error("index {index} out of range for ledger of {len} records")]
    OutOfRange { index: usize, len: usize },

    /// An import payload was not a well-formed sequence of records.
    #[error("{0}")]
    ImportFormat(String),

    /// A record was built with a required field left empty.
    #[error("{0}")]
    InvalidRecord(String),

    /// Records could not be serialised for export.
    #[error("failed to serialise ledger: {0}")]
    Serialise(String),
}

impl From<LedgerError> for VaultError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::OutOfRange { index, len } => VaultError::OutOfRange { index, len },
            LedgerError::ImportFormat(msg) => VaultError::ImportFormat(msg),
            LedgerError::InvalidRecord(msg) => VaultError::ValidationFailure(msg),
            LedgerError::Serialise(msg) => VaultError::Internal(msg),
        }
    }
}

/// Ordered identity records plus the caller's current view.
#[derive(Debug, Clone)]
pub struct Ledger {
    records: Vec<IdentityRecord>,
    view: ViewState,
    page_size: usize,
}

impl Ledger {
    /// Create an empty ledger showing `page_size` records per page.
    ///
    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            view: ViewState::default(),
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn records(&self) -> &[IdentityRecord] {
        &self.records
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Result<&IdentityRecord, LedgerError> {
        self.records.get(index).ok_or(LedgerError::OutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// Add `record` at the end and return its index. Duplicates are allowed.
    pub fn append(&mut self, record: IdentityRecord) -> usize {
        self.records.push(record);
        let index = self.records.len() - 1;
        debug!(index, len = self.records.len(), "record appended");
        index
    }

    /// Replace the record at `index` without moving it.
    ///
    /// The replacement inherits the existing record's external reference.
    pub fn update_at(&mut self, index: usize, mut record: IdentityRecord) -> Result<(), LedgerError> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(LedgerError::OutOfRange { index, len })?;
        record.inherit_external_ref(slot);
        *slot = record;
        debug!(index, "record updated");
        Ok(())
    }

    /// Remove the record at `index`, shifting later records down by one.
    ///
    /// If the removal leaves the current page past the end of the filtered
    /// view, the current page steps back (never below page 1).
    pub fn remove_at(&mut self, index: usize) -> Result<IdentityRecord, LedgerError> {
        if index >= self.records.len() {
            return Err(LedgerError::OutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);

        let visible = view::search(&self.records, &self.view.filter).len();
        let last_page = view::page_count(visible, self.page_size).max(1);
        if self.view.page > last_page {
            debug!(from = self.view.page, to = last_page, "current page stepped back");
            self.view.page = last_page;
        }
        debug!(index, len = self.records.len(), "record removed");
        Ok(removed)
    }

    /// Records whose name or email contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<(usize, &IdentityRecord)> {
        view::search(&self.records, query)
    }

    /// Store a new filter and return to page 1.
    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.view.filter = query.into();
        self.view.page = 1;
    }

    /// Store the requested page (at least 1). A page past the end is kept
    /// and shows as empty.
    pub fn set_page(&mut self, page: usize) {
        self.view.page = page.max(1);
    }

    /// The current page of the current filter.
    pub fn current_view(&self) -> Page<'_> {
        let hits = self.search(&self.view.filter);
        Page {
            page: self.view.page,
            total_pages: view::page_count(hits.len(), self.page_size),
            items: view::paginate(&hits, self.view.page, self.page_size).to_vec(),
        }
    }

    /// Serialise every record in order.
    pub fn export_all(&self) -> Result<String, LedgerError> {
        codec::export(&self.records)
    }

    /// Replace the entire contents with the records in `text`.
    ///
    /// The view resets to page 1 with no filter. On error the ledger is
    /// untouched.
    pub fn import_replace(&mut self, text: &str) -> Result<(), LedgerError> {
        let records = codec::import(text)?;
        self.records = records;
        self.view = ViewState::default();
        debug!(len = self.records.len(), "ledger replaced from import");
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
