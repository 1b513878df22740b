/// liquidation - an overdue loan forfeits its collateral
use chrono::{Duration, TimeZone, Utc};
use collateral_lending_rs::{LendingEngine, LendingError, Money, VaultTreasury};
use collateral_lending_rs::{SafeTimeProvider, TimeSource, Uuid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== liquidation example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let principal = Uuid::new_v4();
    let lender = Uuid::new_v4();
    let client = Uuid::new_v4();

    let mut engine = LendingEngine::new(principal, VaultTreasury::new(Money::from_major(100_000)));
    engine.register_lender(principal, lender)?;
    engine.register_client(lender, client)?;

    engine.deposit_collateral(client, Money::from_major(1_000), &time)?;
    let id = engine.request_loan(client, Money::from_major(500), 1_000, &time)?;
    let deadline = engine.approve_loan(lender, client, id, &time)?;
    println!("loan {} approved, due {}", id, deadline);

    // too early: the deadline has not passed yet
    controller.advance(Duration::seconds(1_000));
    match engine.liquidate_loan(lender, client, id, &time) {
        Err(LendingError::DeadlineNotReached { .. }) => {
            println!("liquidation refused at the deadline itself")
        }
        other => println!("unexpected: {:?}", other),
    }

    // one second past the deadline the collateral is forfeit
    controller.advance(Duration::seconds(1));
    engine.liquidate_loan(lender, client, id, &time)?;
    let loan = engine.loan(client, id)?;
    println!("\nloan {} is now {}", id, loan.status);
    println!(
        "remaining collateral: {}",
        engine.collateral_balance(client)
    );

    // the borrower can no longer repay
    match engine.repay_loan(client, id, &time) {
        Err(LendingError::InvalidState { current }) => {
            println!("repayment refused: loan is {}", current)
        }
        other => println!("unexpected: {:?}", other),
    }

    for event in engine.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}
