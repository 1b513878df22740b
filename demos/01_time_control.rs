/// time control - deterministic lifecycle runs with controlled time
use chrono::{Duration, TimeZone, Utc};
use collateral_lending_rs::{LendingEngine, Money, VaultTreasury};
use collateral_lending_rs::{SafeTimeProvider, TimeSource, Uuid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    // create controlled time for testing
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let principal = Uuid::new_v4();
    let client = Uuid::new_v4();

    // the principal doubles as a lender agent
    let mut engine = LendingEngine::new(principal, VaultTreasury::new(Money::from_major(100_000)));
    engine.register_client(principal, client)?;

    engine.deposit_collateral(client, Money::from_major(1_000), &time)?;
    let id = engine.request_loan(client, Money::from_major(500), 1_000, &time)?;
    println!("loan requested at {}", time.now());

    // approve 100 seconds later
    controller.advance(Duration::seconds(100));
    let deadline = engine.approve_loan(principal, client, id, &time)?;
    println!("approved at {}, deadline {}", time.now(), deadline);

    // advance to the deadline itself - repayment is still allowed
    controller.advance(Duration::seconds(1_000));
    println!("\nnow == deadline: {}", time.now() == deadline);
    engine.repay_loan(client, id, &time)?;
    println!("repaid exactly at the deadline");
    println!(
        "remaining collateral: {}",
        engine.collateral_balance(client)
    );

    Ok(())
}
