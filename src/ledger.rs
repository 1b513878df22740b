use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::decimal::Money;
use crate::errors::{LendingError, Result};
use crate::types::AccountId;

/// per-client collateral balances
///
/// holds no authorization logic of its own; the engine validates the caller
/// before any balance moves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollateralLedger {
    balances: HashMap<AccountId, Money>,
}

impl CollateralLedger {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// current balance; zero for accounts that never deposited
    pub fn balance(&self, client: AccountId) -> Money {
        self.balances.get(&client).copied().unwrap_or(Money::ZERO)
    }

    /// credit a deposit; a zero amount is a no-op, not an error
    pub(crate) fn deposit(&mut self, client: AccountId, amount: Money) -> Money {
        let balance = self.balances.entry(client).or_insert(Money::ZERO);
        *balance += amount;
        *balance
    }

    /// debit collateral on loan resolution
    ///
    /// refuses to underflow: the balance check at request time does not
    /// reserve collateral, so concurrent open loans can over-commit it and
    /// the shortfall surfaces here.
    pub(crate) fn debit(&mut self, client: AccountId, amount: Money) -> Result<Money> {
        let balance = self.balances.entry(client).or_insert(Money::ZERO);

        match balance.checked_sub(amount) {
            Some(remaining) => {
                *balance = remaining;
                Ok(remaining)
            }
            None => Err(LendingError::InsufficientCollateral {
                available: *balance,
                requested: amount,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_unknown_account_has_zero_balance() {
        let ledger = CollateralLedger::new();
        assert_eq!(ledger.balance(Uuid::new_v4()), Money::ZERO);
    }

    #[test]
    fn test_deposits_accumulate() {
        let mut ledger = CollateralLedger::new();
        let client = Uuid::new_v4();

        assert_eq!(ledger.deposit(client, Money::from_major(600)), Money::from_major(600));
        assert_eq!(ledger.deposit(client, Money::from_major(400)), Money::from_major(1000));
        assert_eq!(ledger.balance(client), Money::from_major(1000));
    }

    #[test]
    fn test_zero_deposit_is_noop() {
        let mut ledger = CollateralLedger::new();
        let client = Uuid::new_v4();

        ledger.deposit(client, Money::from_major(100));
        assert_eq!(ledger.deposit(client, Money::ZERO), Money::from_major(100));
    }

    #[test]
    fn test_debit_reduces_balance() {
        let mut ledger = CollateralLedger::new();
        let client = Uuid::new_v4();

        ledger.deposit(client, Money::from_major(1000));
        assert_eq!(
            ledger.debit(client, Money::from_major(500)).unwrap(),
            Money::from_major(500)
        );
        assert_eq!(ledger.balance(client), Money::from_major(500));
    }

    #[test]
    fn test_debit_refuses_underflow() {
        let mut ledger = CollateralLedger::new();
        let client = Uuid::new_v4();

        ledger.deposit(client, Money::from_major(200));
        assert_eq!(
            ledger.debit(client, Money::from_major(800)),
            Err(LendingError::InsufficientCollateral {
                available: Money::from_major(200),
                requested: Money::from_major(800),
            })
        );
        // balance untouched on refusal
        assert_eq!(ledger.balance(client), Money::from_major(200));
    }

    #[test]
    fn test_debit_to_exactly_zero() {
        let mut ledger = CollateralLedger::new();
        let client = Uuid::new_v4();

        ledger.deposit(client, Money::from_major(300));
        assert_eq!(
            ledger.debit(client, Money::from_major(300)).unwrap(),
            Money::ZERO
        );
    }
}
