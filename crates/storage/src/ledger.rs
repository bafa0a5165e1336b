use std::collections::BTreeMap;

use granary_core::{CapacityConfig, Good, StorageError, StorageResult};

/// Per-good quantity ledger bounded by container and storage capacity.
///
/// One container per distinct good: a key is present iff a container is
/// allocated for that good, and an allocated container may hold zero. The
/// allocated-container count is always the key cardinality, so it cannot drift.
///
/// Invariants:
/// - every stored quantity is within `0..=container_capacity`
/// - `container_count() <= max_container_count()`
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityLedger<G: Good> {
    config: CapacityConfig,
    contents: BTreeMap<G, f64>,
}

impl<G: Good> CapacityLedger<G> {
    /// Validate capacities and create an empty ledger.
    pub fn new(container_capacity: f64, storage_capacity: f64) -> StorageResult<Self> {
        Ok(Self::from_config(CapacityConfig::new(
            container_capacity,
            storage_capacity,
        )?))
    }

    pub fn from_config(config: CapacityConfig) -> Self {
        Self {
            config,
            contents: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &CapacityConfig {
        &self.config
    }

    pub fn container_capacity(&self) -> f64 {
        self.config.container_capacity()
    }

    pub fn storage_capacity(&self) -> f64 {
        self.config.storage_capacity()
    }

    pub fn max_container_count(&self) -> usize {
        self.config.max_container_count()
    }

    pub fn container_count(&self) -> usize {
        self.contents.len()
    }

    pub fn has_container(&self, good: &G) -> bool {
        self.contents.contains_key(good)
    }

    /// Read-only view of the good -> quantity mapping.
    pub fn contents(&self) -> &BTreeMap<G, f64> {
        &self.contents
    }

    pub fn total_stored(&self) -> f64 {
        self.contents.values().sum()
    }

    /// Store `amount` of `good`, allocating its container on first use.
    ///
    /// Returns the overflow: the part of `amount` that did not fit into the
    /// container (zero when everything was absorbed).
    pub fn deposit(&mut self, good: G, amount: f64) -> StorageResult<f64> {
        if !amount.is_finite() {
            return Err(StorageError::invalid_argument("amount must be a finite number"));
        }
        if amount < 0.0 {
            return Err(StorageError::invalid_argument("amount can not be negative"));
        }

        let current = match self.contents.get(&good) {
            Some(quantity) => *quantity,
            None => {
                if !self.has_free_slot() {
                    tracing::warn!(good = %good, containers = self.container_count(), "storage full");
                    return Err(StorageError::capacity_exhausted(
                        "storage is full, can not add new container",
                    ));
                }
                tracing::debug!(good = %good, "container allocated");
                0.0
            }
        };

        let capacity = self.container_capacity();
        let (stored, overflow) = if current + amount > capacity {
            (capacity, amount - (capacity - current))
        } else {
            (current + amount, 0.0)
        };

        if overflow > 0.0 {
            tracing::debug!(good = %good, overflow, "container filled");
        }
        self.contents.insert(good, stored);
        Ok(overflow)
    }

    /// Take `amount` of `good` out of its container.
    ///
    /// When the stock covers the request, the container shrinks by `amount`
    /// and `amount` is returned. Otherwise the container is emptied and the
    /// *shortfall* (`amount - stock`) is returned, not the quantity removed.
    pub fn withdraw(&mut self, good: &G, amount: f64) -> StorageResult<f64> {
        if !amount.is_finite() {
            return Err(StorageError::invalid_argument("amount must be a finite number"));
        }
        if amount <= 0.0 {
            return Err(StorageError::invalid_argument("amount must be positive"));
        }

        let Some(current) = self.contents.get_mut(good) else {
            return Err(StorageError::good_not_found(format!(
                "good {good} is absent in storage"
            )));
        };

        if amount > *current {
            let shortfall = amount - *current;
            *current = 0.0;
            tracing::debug!(good = %good, shortfall, "withdrawal exceeded stock");
            return Ok(shortfall);
        }

        *current -= amount;
        Ok(amount)
    }

    /// Free the container of `good` if it is allocated and exactly empty.
    pub fn reclaim_container(&mut self, good: &G) -> bool {
        match self.contents.get(good) {
            Some(quantity) if *quantity == 0.0 => {
                self.contents.remove(good);
                tracing::debug!(good = %good, "container reclaimed");
                true
            }
            _ => false,
        }
    }

    /// Stored quantity of `good`, zero when no container is allocated.
    pub fn amount_of(&self, good: &G) -> f64 {
        self.contents.get(good).copied().unwrap_or(0.0)
    }

    /// Room left for `good`.
    ///
    /// Without an allocated container this reports the size of a fresh one,
    /// or fails if no further container could be allocated. Never allocates.
    pub fn free_space_of(&self, good: &G) -> StorageResult<f64> {
        match self.contents.get(good) {
            Some(quantity) => Ok(self.container_capacity() - quantity),
            None if self.has_free_slot() => Ok(self.container_capacity()),
            None => Err(StorageError::capacity_exhausted(format!(
                "no space to store {good}"
            ))),
        }
    }

    /// Human-readable dump of configuration and per-good quantities.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    fn has_free_slot(&self) -> bool {
        self.container_count() < self.max_container_count()
    }
}

impl<G: Good> core::fmt::Display for CapacityLedger<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Container capacity: {};", self.container_capacity())?;
        writeln!(f, "Storage capacity: {};", self.storage_capacity())?;
        write!(f, "Goods: ")?;
        for (i, (good, quantity)) in self.contents.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{good} = {quantity}")?;
        }
        Ok(())
    }
}
