//! Common types, wire formats, and errors shared across `identity-vault` crates.

pub mod error;
pub mod protocol;

pub use error::VaultError;
