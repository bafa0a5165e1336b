//! Non-interactive runner for the cereal ledger.
//!
//! Operations are given as `op:good[:amount]` tokens, e.g.
//! `deposit:BUCKWHEAT:49 withdraw:BUCKWHEAT:10 reclaim:PEAS describe`.

use core::str::FromStr;

use anyhow::{anyhow, bail, Context};

use granary_core::{Cereal, StorageResult};
use granary_storage::CapacityLedger;

pub mod cli;

pub use cli::{load_config_file, Cli, CONFIG_PATH_ENV};

/// One scripted ledger operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Deposit { good: Cereal, amount: f64 },
    Withdraw { good: Cereal, amount: f64 },
    Reclaim(Cereal),
    Amount(Cereal),
    Space(Cereal),
    Describe,
}

impl Operation {
    /// Apply to `ledger`, returning the line to print.
    pub fn apply(&self, ledger: &mut CapacityLedger<Cereal>) -> StorageResult<String> {
        let line = match *self {
            Operation::Deposit { good, amount } => {
                let overflow = ledger.deposit(good, amount)?;
                format!("{self}: overflow {overflow}")
            }
            Operation::Withdraw { good, amount } => {
                let withdrawn = ledger.withdraw(&good, amount)?;
                format!("{self}: returned {withdrawn}")
            }
            Operation::Reclaim(good) => {
                format!("{self}: {}", ledger.reclaim_container(&good))
            }
            Operation::Amount(good) => format!("{self}: {}", ledger.amount_of(&good)),
            Operation::Space(good) => format!("{self}: {}", ledger.free_space_of(&good)?),
            Operation::Describe => ledger.describe(),
        };
        Ok(line)
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Operation::Deposit { good, amount } => write!(f, "deposit:{good}:{amount}"),
            Operation::Withdraw { good, amount } => write!(f, "withdraw:{good}:{amount}"),
            Operation::Reclaim(good) => write!(f, "reclaim:{good}"),
            Operation::Amount(good) => write!(f, "amount:{good}"),
            Operation::Space(good) => write!(f, "space:{good}"),
            Operation::Describe => f.write_str("describe"),
        }
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let good = |idx: usize| -> anyhow::Result<Cereal> {
            let raw = parts
                .get(idx)
                .ok_or_else(|| anyhow!("missing good in {s:?}"))?;
            Ok(raw.parse::<Cereal>()?)
        };
        let amount = |idx: usize| -> anyhow::Result<f64> {
            let raw = parts
                .get(idx)
                .ok_or_else(|| anyhow!("missing amount in {s:?}"))?;
            raw.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid amount in {s:?}"))
        };

        let (op, arity) = match parts[0].to_ascii_lowercase().as_str() {
            "deposit" => (
                Operation::Deposit {
                    good: good(1)?,
                    amount: amount(2)?,
                },
                3,
            ),
            "withdraw" => (
                Operation::Withdraw {
                    good: good(1)?,
                    amount: amount(2)?,
                },
                3,
            ),
            "reclaim" => (Operation::Reclaim(good(1)?), 2),
            "amount" => (Operation::Amount(good(1)?), 2),
            "space" => (Operation::Space(good(1)?), 2),
            "describe" => (Operation::Describe, 1),
            other => bail!("unknown operation {other:?}"),
        };
        if parts.len() != arity {
            bail!("expected {arity} ':'-separated fields in {s:?}");
        }
        Ok(op)
    }
}

/// Apply `ops` in order. Domain errors are reported inline and do not stop the run.
pub fn run(ledger: &mut CapacityLedger<Cereal>, ops: &[Operation]) -> Vec<String> {
    ops.iter()
        .map(|op| match op.apply(ledger) {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(operation = %op, error = %err, "operation rejected");
                format!("{op}: error: {err}")
            }
        })
        .collect()
}
