//! Storage error model.

use thiserror::Error;

/// Result type used across the storage domain.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-level error.
///
/// Every variant is a recoverable, caller-visible failure. None of them leave
/// the ledger partially mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Capacity parameters violate ordering or non-negativity constraints.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation received an out-of-range amount.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Allocating another container would exceed the storage-wide limit.
    #[error("capacity exhausted: {0}")]
    CapacityExhausted(String),

    /// No container is allocated for the requested good.
    #[error("good not found: {0}")]
    GoodNotFound(String),

    /// A good identifier could not be parsed.
    #[error("unknown good: {0}")]
    UnknownGood(String),
}

impl StorageError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn capacity_exhausted(msg: impl Into<String>) -> Self {
        Self::CapacityExhausted(msg.into())
    }

    pub fn good_not_found(msg: impl Into<String>) -> Self {
        Self::GoodNotFound(msg.into())
    }

    pub fn unknown_good(msg: impl Into<String>) -> Self {
        Self::UnknownGood(msg.into())
    }
}
