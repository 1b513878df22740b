/// quick start - minimal example to get started
use collateral_lending_rs::{LendingEngine, Money, VaultTreasury};
use collateral_lending_rs::{SafeTimeProvider, TimeSource, Uuid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // the desk: a principal, one lender agent, one client
    let principal = Uuid::new_v4();
    let lender = Uuid::new_v4();
    let client = Uuid::new_v4();

    let mut engine = LendingEngine::new(principal, VaultTreasury::new(Money::from_major(100_000)));
    engine.register_lender(principal, lender)?;
    engine.register_client(lender, client)?;

    // deposit collateral and borrow against it
    engine.deposit_collateral(client, Money::from_major(1_000), &time)?;
    let id = engine.request_loan(client, Money::from_major(500), 3_600, &time)?;
    let deadline = engine.approve_loan(lender, client, id, &time)?;
    println!("loan {} approved, due {}", id, deadline);

    // repay within the term
    engine.repay_loan(client, id, &time)?;
    println!(
        "loan {} repaid, remaining collateral: {}",
        id,
        engine.collateral_balance(client)
    );

    Ok(())
}
