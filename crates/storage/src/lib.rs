//! Warehouse storage domain module.
//!
//! This crate contains the capacity ledger, implemented purely as
//! deterministic domain logic (no IO, no persistence, no presentation).

pub mod ledger;

pub use granary_core::{CapacityConfig, Cereal, Good, GoodName, StorageError, StorageResult};
pub use ledger::CapacityLedger;
