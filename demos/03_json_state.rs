/// json state - serialize the ledger and inspect the audit trail
use collateral_lending_rs::{LedgerView, LendingEngine, Money, VaultTreasury};
use collateral_lending_rs::{SafeTimeProvider, TimeSource, Uuid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    let principal = Uuid::new_v4();
    let client = Uuid::new_v4();

    let mut engine = LendingEngine::new(principal, VaultTreasury::new(Money::from_major(100_000)));
    engine.register_client(principal, client)?;
    engine.deposit_collateral(client, Money::from_major(1_000), &time)?;
    let id = engine.request_loan(client, Money::from_major(250), 86_400, &time)?;
    engine.approve_loan(principal, client, id, &time)?;

    // the whole ledger as json
    let view = engine.view();
    let json = view.to_json_pretty()?;
    println!("{}", json);

    // the view round-trips
    let restored: LedgerView = serde_json::from_str(&json)?;
    assert_eq!(restored, view);

    // one snapshot per mutating operation
    println!("\naudit trail:");
    for snapshot in engine.snapshots() {
        println!("  {} - {}", snapshot.timestamp, snapshot.trigger);
    }

    Ok(())
}
