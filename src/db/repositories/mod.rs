//! Repository implementations module.
//!
//! This module contains the implementations of the `LedgerRepository` trait:
//! - `local`: in-memory sharded ledger for unit testing and local deployments

#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "local-repo")]
pub use local::LocalLedger;
