//! Capacity configuration (fixed at construction, immutable thereafter).

use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};
use crate::value_object::ValueObject;

/// Environment variable holding the per-container capacity.
pub const CONTAINER_CAPACITY_ENV: &str = "GRANARY_CONTAINER_CAPACITY";
/// Environment variable holding the storage-wide capacity.
pub const STORAGE_CAPACITY_ENV: &str = "GRANARY_STORAGE_CAPACITY";

pub const DEFAULT_CONTAINER_CAPACITY: f64 = 25.0;
pub const DEFAULT_STORAGE_CAPACITY: f64 = 70.0;

/// Validated warehouse capacities.
///
/// Invariants (checked by [`CapacityConfig::new`] and on deserialization):
/// - both values are finite
/// - `container_capacity >= 0`
/// - `storage_capacity >= container_capacity`
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCapacityConfig")]
pub struct CapacityConfig {
    container_capacity: f64,
    storage_capacity: f64,
}

impl ValueObject for CapacityConfig {}

#[derive(Deserialize)]
struct RawCapacityConfig {
    container_capacity: f64,
    storage_capacity: f64,
}

impl TryFrom<RawCapacityConfig> for CapacityConfig {
    type Error = StorageError;

    fn try_from(raw: RawCapacityConfig) -> Result<Self, Self::Error> {
        Self::new(raw.container_capacity, raw.storage_capacity)
    }
}

impl CapacityConfig {
    pub fn new(container_capacity: f64, storage_capacity: f64) -> StorageResult<Self> {
        if !container_capacity.is_finite() || !storage_capacity.is_finite() {
            return Err(StorageError::invalid_configuration(
                "capacities must be finite numbers",
            ));
        }
        if container_capacity < 0.0 {
            return Err(StorageError::invalid_configuration(
                "capacity of container can not be negative",
            ));
        }
        if storage_capacity < container_capacity {
            return Err(StorageError::invalid_configuration(
                "capacity of container must be less or equal storage capacity",
            ));
        }
        Ok(Self {
            container_capacity,
            storage_capacity,
        })
    }

    pub fn container_capacity(&self) -> f64 {
        self.container_capacity
    }

    pub fn storage_capacity(&self) -> f64 {
        self.storage_capacity
    }

    /// `floor(storage_capacity / container_capacity)`, saturating.
    ///
    /// Zero-sized containers in a non-empty storage give `usize::MAX`; `0 / 0`
    /// gives zero containers.
    pub fn max_container_count(&self) -> usize {
        // `as` saturates: +inf -> usize::MAX, NaN -> 0.
        (self.storage_capacity / self.container_capacity).floor() as usize
    }

    /// Parse a JSON document such as
    /// `{"container_capacity": 25, "storage_capacity": 70}`.
    pub fn from_json_str(json: &str) -> StorageResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| StorageError::invalid_configuration(format!("config json: {e}")))
    }

    /// Load from `GRANARY_CONTAINER_CAPACITY` / `GRANARY_STORAGE_CAPACITY`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> StorageResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CapacityConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> StorageResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: f64| -> StorageResult<f64> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => raw.trim().parse::<f64>().map_err(|e| {
                    StorageError::invalid_configuration(format!("{key}={raw:?}: {e}"))
                }),
            }
        };

        let container_capacity = read(CONTAINER_CAPACITY_ENV, DEFAULT_CONTAINER_CAPACITY)?;
        let storage_capacity = read(STORAGE_CAPACITY_ENV, DEFAULT_STORAGE_CAPACITY)?;
        let config = Self::new(container_capacity, storage_capacity)?;

        tracing::debug!(
            container_capacity,
            storage_capacity,
            max_container_count = config.max_container_count(),
            "capacity configuration loaded"
        );
        Ok(config)
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            container_capacity: DEFAULT_CONTAINER_CAPACITY,
            storage_capacity: DEFAULT_STORAGE_CAPACITY,
        }
    }
}
