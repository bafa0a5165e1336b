//! `granary-core` — foundation types for the granary workspace.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error taxonomy, good identifiers and the validated capacity configuration.

pub mod config;
pub mod error;
pub mod good;
pub mod value_object;

pub use config::CapacityConfig;
pub use error::{StorageError, StorageResult};
pub use good::{Cereal, Good, GoodName};
pub use value_object::ValueObject;
