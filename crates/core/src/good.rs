//! Good identifiers.
//!
//! A good is a category of stored item. The ledger is generic over the
//! identifier type: use [`Cereal`] when the set of goods is known up front, or
//! [`GoodName`] for an open set keyed by name.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Identifier of a category of stored item.
///
/// `Ord` keeps ledger iteration (and therefore `describe()`) deterministic.
pub trait Good: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display {}

impl<T> Good for T where T: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display {}

/// Closed set of cereal kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cereal {
    Buckwheat,
    Bulgur,
    Millet,
    Peas,
    Rice,
}

impl Cereal {
    pub const ALL: [Cereal; 5] = [
        Cereal::Buckwheat,
        Cereal::Bulgur,
        Cereal::Millet,
        Cereal::Peas,
        Cereal::Rice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Cereal::Buckwheat => "BUCKWHEAT",
            Cereal::Bulgur => "BULGUR",
            Cereal::Millet => "MILLET",
            Cereal::Peas => "PEAS",
            Cereal::Rice => "RICE",
        }
    }
}

impl core::fmt::Display for Cereal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cereal {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Cereal::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StorageError::unknown_good(format!("Cereal: {wanted:?}")))
    }
}

/// Open good identifier (any non-blank name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoodName(String);

impl GoodName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for GoodName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GoodName {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(StorageError::unknown_good("GoodName: name cannot be empty"));
        }
        Ok(Self(name.to_string()))
    }
}

impl From<Cereal> for GoodName {
    fn from(value: Cereal) -> Self {
        Self(value.as_str().to_string())
    }
}
