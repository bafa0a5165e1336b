//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Configuration
/// such as [`crate::CapacityConfig`] is fixed once validated; to "change" it,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
