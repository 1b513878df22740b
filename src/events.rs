use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AccountId, LoanId};

/// all events that can be emitted by the lending engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    LoanRequested {
        borrower: AccountId,
        amount: Money,
        term_secs: u32,
        requested_at: DateTime<Utc>,
    },
    LoanApproved {
        borrower: AccountId,
        amount: Money,
        loan_id: LoanId,
    },
    LoanRepaid {
        borrower: AccountId,
        amount: Money,
        loan_id: LoanId,
    },
    CollateralLiquidated {
        borrower: AccountId,
        loan_id: LoanId,
        amount: Money,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
