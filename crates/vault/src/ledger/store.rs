//! [`LedgerStore`]: shared handle to the ledger for concurrent callers.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::{IdentityRecord, Ledger, LedgerError};

/// An owned copy of one page of the ledger view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub page: usize,
    pub total_pages: usize,
    pub items: Vec<(usize, IdentityRecord)>,
}

/// Thread-safe handle to a single [`Ledger`].
///
/// Wraps an `Arc<RwLock<Ledger>>` so that:
/// - Every mutation (append, update, remove, import, filter or page changes)
///   holds the write lock for the whole operation and is observed
///   all-or-nothing.
/// - Reads (search, export, unchanged-view snapshots) share the read lock and
///   never see a half-applied mutation.
#[derive(Clone, Debug)]
pub struct LedgerStore {
    inner: Arc<RwLock<Ledger>>,
}

impl LedgerStore {
    /// Create a store around an empty ledger with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self::from_ledger(Ledger::new(page_size))
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn get(&self, index: usize) -> Result<IdentityRecord, LedgerError> {
        self.inner.read().await.get(index).cloned()
    }

    pub async fn append(&self, record: IdentityRecord) -> usize {
        self.inner.write().await.append(record)
    }

    pub async fn update_at(&self, index: usize, record: IdentityRecord) -> Result<(), LedgerError> {
        self.inner.write().await.update_at(index, record)
    }

    pub async fn remove_at(&self, index: usize) -> Result<IdentityRecord, LedgerError> {
        self.inner.write().await.remove_at(index)
    }

    /// Owned search results, in ledger order.
    pub async fn search(&self, query: &str) -> Vec<(usize, IdentityRecord)> {
        let lock = self.inner.read().await;
        lock.search(query)
            .into_iter()
            .map(|(i, rec)| (i, rec.clone()))
            .collect()
    }

    /// Apply an optional new filter and page, then snapshot the current view.
    ///
    /// A new filter resets the page to 1 before `page` is applied. The view
    /// state belongs to the ledger, so every caller shares one filter and
    /// page. A call that changes neither holds only the read lock.
    pub async fn view(&self, filter: Option<String>, page: Option<usize>) -> PageSnapshot {
        if filter.is_none() && page.is_none() {
            return snapshot(&*self.inner.read().await);
        }
        let mut lock = self.inner.write().await;
        if let Some(filter) = filter {
            lock.set_filter(filter);
        }
        if let Some(page) = page {
            lock.set_page(page);
        }
        snapshot(&lock)
    }

    pub async fn export_all(&self) -> Result<String, LedgerError> {
        self.inner.read().await.export_all()
    }

    pub async fn import_replace(&self, text: &str) -> Result<(), LedgerError> {
        self.inner.write().await.import_replace(text)
    }
}

fn snapshot(ledger: &Ledger) -> PageSnapshot {
    let view = ledger.current_view();
    PageSnapshot {
        page: view.page,
        total_pages: view.total_pages,
        items: view
            .items
            .into_iter()
            .map(|(i, rec)| (i, rec.clone()))
            .collect(),
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::from_ledger(Ledger::default())
    }
}
