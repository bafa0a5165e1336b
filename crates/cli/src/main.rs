use clap::Parser;

use granary_cli::{Cli, Operation};
use granary_core::Cereal;
use granary_storage::CapacityLedger;

fn main() -> anyhow::Result<()> {
    granary_observability::init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let mut ops = cli.ops;
    if ops.is_empty() {
        ops.push(Operation::Describe);
    }

    let mut ledger: CapacityLedger<Cereal> = CapacityLedger::from_config(config);
    tracing::info!(
        container_capacity = ledger.container_capacity(),
        storage_capacity = ledger.storage_capacity(),
        max_container_count = ledger.max_container_count(),
        operations = ops.len(),
        "running operations"
    );

    for line in granary_cli::run(&mut ledger, &ops) {
        println!("{line}");
    }
    Ok(())
}
