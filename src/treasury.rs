use crate::decimal::Money;
use crate::errors::{LendingError, Result};
use crate::types::AccountId;

/// settlement collaborator that moves value out of the system's custody
///
/// transfers are all-or-nothing: implementations either complete the whole
/// movement or fail with `InsufficientFunds` and move nothing. The engine
/// invokes this before any ledger or registry mutation, so a failure aborts
/// the enclosing operation cleanly.
pub trait Treasury {
    /// move `amount` to `recipient`
    fn transfer(&mut self, amount: Money, recipient: AccountId) -> Result<()>;
}

/// a completed outbound transfer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferRecord {
    pub recipient: AccountId,
    pub amount: Money,
}

/// treasury backed by a finite reserve, for tests and simulations
#[derive(Debug, Clone)]
pub struct VaultTreasury {
    reserve: Money,
    transfers: Vec<TransferRecord>,
}

impl VaultTreasury {
    pub fn new(reserve: Money) -> Self {
        Self {
            reserve,
            transfers: Vec::new(),
        }
    }

    /// remaining reserve
    pub fn reserve(&self) -> Money {
        self.reserve
    }

    /// completed transfers in order
    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }
}

impl Treasury for VaultTreasury {
    fn transfer(&mut self, amount: Money, recipient: AccountId) -> Result<()> {
        match self.reserve.checked_sub(amount) {
            Some(remaining) => {
                self.reserve = remaining;
                self.transfers.push(TransferRecord { recipient, amount });
                Ok(())
            }
            None => Err(LendingError::InsufficientFunds {
                available: self.reserve,
                requested: amount,
            }),
        }
    }
}
