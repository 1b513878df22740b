use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::decimal::Money;
use crate::errors::{LendingError, Result};
use crate::types::{AccountId, Loan, LoanId, LoanStatus};

/// durable record of every loan, per client
///
/// loans live in an arena keyed by `(borrower, id)`; the per-client id list
/// exists purely to preserve creation order for enumeration and is never a
/// second copy of loan data.
#[derive(Debug, Clone, Default)]
pub struct LoanRegistry {
    loans: HashMap<(AccountId, LoanId), Loan>,
    ids_by_borrower: HashMap<AccountId, Vec<LoanId>>,
}

impl LoanRegistry {
    pub fn new() -> Self {
        Self {
            loans: HashMap::new(),
            ids_by_borrower: HashMap::new(),
        }
    }

    /// allocate the next id for `borrower` and store a new requested loan
    pub(crate) fn create(
        &mut self,
        borrower: AccountId,
        amount: Money,
        term_secs: u32,
        now: DateTime<Utc>,
    ) -> LoanId {
        let ids = self.ids_by_borrower.entry(borrower).or_default();
        let id = ids.len() as LoanId + 1;

        self.loans.insert(
            (borrower, id),
            Loan {
                id,
                borrower,
                amount,
                term_secs,
                requested_at: now,
                deadline: None,
                status: LoanStatus::Requested,
            },
        );
        ids.push(id);

        id
    }

    /// look up a loan; ids are dense per borrower, so the arena lookup
    /// rejects exactly `id == 0` and `id > count`
    pub fn get(&self, borrower: AccountId, id: LoanId) -> Result<&Loan> {
        self.loans
            .get(&(borrower, id))
            .ok_or(LendingError::LoanNotFound { borrower, id })
    }

    /// loan ids for `borrower` in creation order; empty for unknown borrowers
    pub fn list_ids(&self, borrower: AccountId) -> &[LoanId] {
        self.ids_by_borrower
            .get(&borrower)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// number of loans ever created for `borrower`
    pub fn count(&self, borrower: AccountId) -> u64 {
        self.list_ids(borrower).len() as u64
    }

    /// loans for `borrower` in creation order
    pub fn loans(&self, borrower: AccountId) -> impl Iterator<Item = &Loan> {
        self.list_ids(borrower)
            .iter()
            .filter_map(move |id| self.loans.get(&(borrower, *id)))
    }

    /// mark approved and stamp the deadline; the loan must still be requested
    pub(crate) fn set_approved(
        &mut self,
        borrower: AccountId,
        id: LoanId,
        deadline: DateTime<Utc>,
    ) -> Result<()> {
        let loan = self.get_mut(borrower, id)?;

        match loan.status {
            LoanStatus::Requested => {
                loan.status = LoanStatus::Approved;
                loan.deadline = Some(deadline);
                Ok(())
            }
            current => Err(LendingError::InvalidState { current }),
        }
    }

    /// mark repaid; the loan must be approved
    pub(crate) fn set_repaid(&mut self, borrower: AccountId, id: LoanId) -> Result<()> {
        self.resolve(borrower, id, LoanStatus::Repaid)
    }

    /// mark liquidated; the loan must be approved
    pub(crate) fn set_liquidated(&mut self, borrower: AccountId, id: LoanId) -> Result<()> {
        self.resolve(borrower, id, LoanStatus::Liquidated)
    }

    fn resolve(&mut self, borrower: AccountId, id: LoanId, terminal: LoanStatus) -> Result<()> {
        debug_assert!(terminal.is_terminal());
        let loan = self.get_mut(borrower, id)?;

        match loan.status {
            LoanStatus::Approved => {
                loan.status = terminal;
                Ok(())
            }
            current => Err(LendingError::InvalidState { current }),
        }
    }

    fn get_mut(&mut self, borrower: AccountId, id: LoanId) -> Result<&mut Loan> {
        self.loans
            .get_mut(&(borrower, id))
            .ok_or(LendingError::LoanNotFound { borrower, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_ids_are_dense_and_one_based() {
        let mut registry = LoanRegistry::new();
        let borrower = Uuid::new_v4();

        for expected in 1..=5 {
            let id = registry.create(borrower, Money::from_major(100), 60, now());
            assert_eq!(id, expected);
        }
        assert_eq!(registry.list_ids(borrower), &[1, 2, 3, 4, 5]);
        assert_eq!(registry.count(borrower), 5);
    }

    #[test]
    fn test_ids_are_per_borrower() {
        let mut registry = LoanRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_eq!(registry.create(a, Money::from_major(100), 60, now()), 1);
        assert_eq!(registry.create(b, Money::from_major(100), 60, now()), 1);
        assert_eq!(registry.create(a, Money::from_major(100), 60, now()), 2);
    }

    #[test]
    fn test_get_rejects_unallocated_ids() {
        let mut registry = LoanRegistry::new();
        let borrower = Uuid::new_v4();
        registry.create(borrower, Money::from_major(100), 60, now());

        assert!(registry.get(borrower, 1).is_ok());
        assert_eq!(
            registry.get(borrower, 0),
            Err(LendingError::LoanNotFound { borrower, id: 0 })
        );
        assert_eq!(
            registry.get(borrower, 2),
            Err(LendingError::LoanNotFound { borrower, id: 2 })
        );
    }

    #[test]
    fn test_unknown_borrower_has_no_loans() {
        let registry = LoanRegistry::new();
        let borrower = Uuid::new_v4();

        assert!(registry.list_ids(borrower).is_empty());
        assert_eq!(registry.count(borrower), 0);
        assert_eq!(registry.loans(borrower).count(), 0);
    }

    #[test]
    fn test_new_loan_shape() {
        let mut registry = LoanRegistry::new();
        let borrower = Uuid::new_v4();
        let id = registry.create(borrower, Money::from_major(500), 1000, now());

        let loan = registry.get(borrower, id).unwrap();
        assert_eq!(loan.id, 1);
        assert_eq!(loan.borrower, borrower);
        assert_eq!(loan.amount, Money::from_major(500));
        assert_eq!(loan.term_secs, 1000);
        assert_eq!(loan.requested_at, now());
        assert_eq!(loan.deadline, None);
        assert_eq!(loan.status, LoanStatus::Requested);
    }

    #[test]
    fn test_approval_stamps_deadline() {
        let mut registry = LoanRegistry::new();
        let borrower = Uuid::new_v4();
        let id = registry.create(borrower, Money::from_major(500), 1000, now());

        let deadline = now() + chrono::Duration::seconds(1000);
        registry.set_approved(borrower, id, deadline).unwrap();

        let loan = registry.get(borrower, id).unwrap();
        assert_eq!(loan.status, LoanStatus::Approved);
        assert_eq!(loan.deadline, Some(deadline));
    }

    #[test]
    fn test_double_approval_rejected() {
        let mut registry = LoanRegistry::new();
        let borrower = Uuid::new_v4();
        let id = registry.create(borrower, Money::from_major(500), 1000, now());

        let deadline = now() + chrono::Duration::seconds(1000);
        registry.set_approved(borrower, id, deadline).unwrap();
        assert_eq!(
            registry.set_approved(borrower, id, deadline),
            Err(LendingError::InvalidState {
                current: LoanStatus::Approved,
            })
        );
    }

    #[test]
    fn test_resolution_requires_approval() {
        let mut registry = LoanRegistry::new();
        let borrower = Uuid::new_v4();
        let id = registry.create(borrower, Money::from_major(500), 1000, now());

        assert_eq!(
            registry.set_repaid(borrower, id),
            Err(LendingError::InvalidState {
                current: LoanStatus::Requested,
            })
        );
        assert_eq!(
            registry.set_liquidated(borrower, id),
            Err(LendingError::InvalidState {
                current: LoanStatus::Requested,
            })
        );
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut registry = LoanRegistry::new();
        let borrower = Uuid::new_v4();
        let deadline = now() + chrono::Duration::seconds(1000);

        let repaid = registry.create(borrower, Money::from_major(500), 1000, now());
        registry.set_approved(borrower, repaid, deadline).unwrap();
        registry.set_repaid(borrower, repaid).unwrap();

        let liquidated = registry.create(borrower, Money::from_major(500), 1000, now());
        registry.set_approved(borrower, liquidated, deadline).unwrap();
        registry.set_liquidated(borrower, liquidated).unwrap();

        // no edge leaves a terminal state
        assert_eq!(
            registry.set_liquidated(borrower, repaid),
            Err(LendingError::InvalidState {
                current: LoanStatus::Repaid,
            })
        );
        assert_eq!(
            registry.set_repaid(borrower, liquidated),
            Err(LendingError::InvalidState {
                current: LoanStatus::Liquidated,
            })
        );
        assert_eq!(
            registry.set_approved(borrower, repaid, deadline),
            Err(LendingError::InvalidState {
                current: LoanStatus::Repaid,
            })
        );
    }
}
