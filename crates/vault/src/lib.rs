//! Identity record protection and ledger.
//!
//! - [`checksum`]: 12-digit national-identifier validation (Verhoeff).
//! - [`crypto`]: passphrase-keyed field cipher and identifier sealing.
//! - [`ledger`]: ordered, index-addressed identity records with search,
//!   pagination, and export/import.
//! - [`server`]: HTTP surface exposing the above to the form workflow.

pub mod checksum;
pub mod config;
pub mod crypto;
pub mod ledger;
pub mod server;
pub mod telemetry;
