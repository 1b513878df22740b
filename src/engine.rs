use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::access::AccessControlRegistry;
use crate::decimal::Money;
use crate::errors::{LendingError, Result};
use crate::events::{Event, EventStore};
use crate::ledger::CollateralLedger;
use crate::registry::LoanRegistry;
use crate::state::{ClientView, EngineSnapshot, LedgerView};
use crate::treasury::Treasury;
use crate::types::{AccountId, Loan, LoanId, LoanStatus};

/// the loan lifecycle engine
///
/// owns the role registry, the collateral ledger and the loan registry, and
/// drives every loan along `Requested → Approved → {Repaid | Liquidated}`.
/// All state lives behind `&mut self`, so operations are serialized and
/// atomic: every precondition is checked before the first mutation, and the
/// treasury is invoked before any ledger or registry write.
pub struct LendingEngine<T: Treasury> {
    access: AccessControlRegistry,
    ledger: CollateralLedger,
    registry: LoanRegistry,
    treasury: T,
    events: EventStore,
    snapshots: Vec<EngineSnapshot>,
}

impl<T: Treasury> LendingEngine<T> {
    /// create an engine administered by `principal`
    ///
    /// the principal is enrolled as a lender agent as well, so it can
    /// register clients and decide loans from the start.
    pub fn new(principal: AccountId, treasury: T) -> Self {
        Self {
            access: AccessControlRegistry::new(principal),
            ledger: CollateralLedger::new(),
            registry: LoanRegistry::new(),
            treasury,
            events: EventStore::new(),
            snapshots: Vec::new(),
        }
    }

    // role management

    /// enroll a new lender agent; principal only
    pub fn register_lender(&mut self, caller: AccountId, candidate: AccountId) -> Result<()> {
        self.access.register_lender(caller, candidate)
    }

    /// activate a new client; lender agents only
    pub fn register_client(&mut self, caller: AccountId, candidate: AccountId) -> Result<()> {
        self.access.register_client(caller, candidate)
    }

    // collateral

    /// deposit collateral into the caller's own balance; returns the new balance
    pub fn deposit_collateral(
        &mut self,
        caller: AccountId,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<Money> {
        self.access.require_activated_client(caller)?;

        let balance = self.ledger.deposit(caller, amount);
        self.snapshot(format!("collateral deposited: {}", amount), time.now());

        Ok(balance)
    }

    // loan lifecycle

    /// open a loan request against the caller's collateral; returns the new id
    ///
    /// the balance check does not reserve collateral: several open loans may
    /// each pass it individually while their sum exceeds the balance.
    pub fn request_loan(
        &mut self,
        caller: AccountId,
        amount: Money,
        term_secs: u32,
        time: &SafeTimeProvider,
    ) -> Result<LoanId> {
        self.access.require_activated_client(caller)?;

        let available = self.ledger.balance(caller);
        if available < amount {
            return Err(LendingError::InsufficientCollateral {
                available,
                requested: amount,
            });
        }

        let now = time.now();
        let id = self.registry.create(caller, amount, term_secs, now);

        self.events.emit(Event::LoanRequested {
            borrower: caller,
            amount,
            term_secs,
            requested_at: now,
        });
        self.snapshot(format!("loan requested: {}", id), now);

        Ok(id)
    }

    /// approve a requested loan and stamp its deadline; lender agents only
    pub fn approve_loan(
        &mut self,
        caller: AccountId,
        borrower: AccountId,
        id: LoanId,
        time: &SafeTimeProvider,
    ) -> Result<DateTime<Utc>> {
        self.access.require_lender_agent(caller)?;

        let loan = self.registry.get(borrower, id)?;
        if loan.status != LoanStatus::Requested {
            return Err(LendingError::InvalidState {
                current: loan.status,
            });
        }
        let amount = loan.amount;
        let term = loan.term();

        let now = time.now();
        let deadline = now + term;
        self.registry.set_approved(borrower, id, deadline)?;

        self.events.emit(Event::LoanApproved {
            borrower,
            amount,
            loan_id: id,
        });
        self.snapshot(format!("loan approved: {}", id), now);

        Ok(deadline)
    }

    /// repay the caller's own approved loan, at or before its deadline
    pub fn repay_loan(
        &mut self,
        caller: AccountId,
        id: LoanId,
        time: &SafeTimeProvider,
    ) -> Result<()> {
        self.access.require_activated_client(caller)?;

        let loan = self.registry.get(caller, id)?;
        if loan.borrower != caller {
            return Err(LendingError::NotBorrower { id });
        }

        let deadline = match (loan.status, loan.deadline) {
            (LoanStatus::Approved, Some(deadline)) => deadline,
            (current, _) => return Err(LendingError::InvalidState { current }),
        };

        let now = time.now();
        if now > deadline {
            return Err(LendingError::DeadlinePassed { deadline, now });
        }

        let amount = loan.amount;
        self.settle(caller, amount)?;
        self.registry.set_repaid(caller, id)?;

        self.events.emit(Event::LoanRepaid {
            borrower: caller,
            amount,
            loan_id: id,
        });
        self.snapshot(format!("loan repaid: {}", id), now);

        Ok(())
    }

    /// seize collateral for an approved loan past its deadline; lender agents only
    pub fn liquidate_loan(
        &mut self,
        caller: AccountId,
        borrower: AccountId,
        id: LoanId,
        time: &SafeTimeProvider,
    ) -> Result<()> {
        self.access.require_lender_agent(caller)?;

        let loan = self.registry.get(borrower, id)?;
        let deadline = match (loan.status, loan.deadline) {
            (LoanStatus::Approved, Some(deadline)) => deadline,
            (current, _) => return Err(LendingError::InvalidState { current }),
        };

        let now = time.now();
        if now <= deadline {
            return Err(LendingError::DeadlineNotReached { deadline, now });
        }

        let amount = loan.amount;
        self.settle(borrower, amount)?;
        self.registry.set_liquidated(borrower, id)?;

        self.events.emit(Event::CollateralLiquidated {
            borrower,
            loan_id: id,
            amount,
        });
        self.snapshot(format!("collateral liquidated: {}", id), now);

        Ok(())
    }

    /// forfeit `amount` of `borrower`'s collateral to the principal
    ///
    /// the collateral check runs before the treasury transfer so that a
    /// transfer can never complete and then strand against a short balance;
    /// a treasury failure likewise aborts before any ledger write.
    fn settle(&mut self, borrower: AccountId, amount: Money) -> Result<()> {
        let available = self.ledger.balance(borrower);
        if available < amount {
            return Err(LendingError::InsufficientCollateral {
                available,
                requested: amount,
            });
        }

        self.treasury.transfer(amount, self.access.principal())?;
        self.ledger.debit(borrower, amount)?;

        Ok(())
    }

    // read-only projections

    pub fn principal(&self) -> AccountId {
        self.access.principal()
    }

    pub fn is_lender_agent(&self, account: AccountId) -> bool {
        self.access.is_lender_agent(account)
    }

    pub fn is_activated_client(&self, account: AccountId) -> bool {
        self.access.is_activated_client(account)
    }

    /// current collateral balance; zero for accounts that never deposited
    pub fn collateral_balance(&self, account: AccountId) -> Money {
        self.ledger.balance(account)
    }

    /// loan ids for `borrower` in creation order; empty for unknown borrowers
    pub fn loan_ids(&self, borrower: AccountId) -> &[LoanId] {
        self.registry.list_ids(borrower)
    }

    /// details of a single loan
    pub fn loan(&self, borrower: AccountId, id: LoanId) -> Result<&Loan> {
        self.registry.get(borrower, id)
    }

    pub fn treasury(&self) -> &T {
        &self.treasury
    }

    /// events emitted since the last take
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    /// drain emitted events
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// audit trail of state snapshots, one per mutating operation
    pub fn snapshots(&self) -> &[EngineSnapshot] {
        &self.snapshots
    }

    /// serializable view of the whole ledger
    pub fn view(&self) -> LedgerView {
        let mut lender_agents: Vec<AccountId> = self.access.lender_agents().collect();
        lender_agents.sort();

        let mut accounts: Vec<AccountId> = self.access.clients().collect();
        accounts.sort();

        let clients = accounts
            .into_iter()
            .map(|account| ClientView {
                account,
                activated: true,
                collateral_balance: self.ledger.balance(account),
                loans: self.registry.loans(account).cloned().collect(),
            })
            .collect();

        LedgerView {
            principal: self.access.principal(),
            lender_agents,
            clients,
        }
    }

    fn snapshot(&mut self, trigger: String, now: DateTime<Utc>) {
        let state = self.view();
        self.snapshots.push(EngineSnapshot::capture(state, trigger, now));
    }
}
