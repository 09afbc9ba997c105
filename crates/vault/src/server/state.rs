//! Shared application state injected into every Axum handler.

use std::time::Duration;

use super::middleware::DEFAULT_REQUEST_TIMEOUT;
use crate::ledger::LedgerStore;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable (`Arc`-backed or `Copy`) so that Axum can
/// clone the state for each request without copying the ledger.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide identity ledger.
    ///
    /// Its view state (filter and page) is shared too: a `GET /records` that
    /// sets `q` or `page` changes what every later plain `GET /records` sees.
    pub ledger: LedgerStore,
    /// Per-request timeout applied by the router.
    pub request_timeout: Duration,
}

impl AppState {
    /// Create a new [`AppState`] around `ledger`.
    pub fn new(ledger: LedgerStore, request_timeout: Duration) -> Self {
        Self {
            ledger,
            request_timeout,
        }
    }
}

impl Default for AppState {
    /// Creates a default [`AppState`] with an empty ledger, suitable for tests.
    fn default() -> Self {
        Self::new(LedgerStore::default(), DEFAULT_REQUEST_TIMEOUT)
    }
}
