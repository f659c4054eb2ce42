//! Account balance mutations.
//!
//! This module implements the ledger core:
//! - Ledger entries (credits and debits, transfer-derived pairs)
//! - Mutation planning (validate, compute new balances, build entries)
//! - Error types for ledger operations
//!
//! Planning is pure: it maps account snapshots plus a mutation request to
//! the balance updates and entries to persist. The database layer owns
//! the atomic commit and retry mechanics.

pub mod entry;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use entry::{EntryType, LedgerEntry, correlation_token};
pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{AccountChange, AccountSnapshot, MutationKind, MutationPlan, MutationRequest};
