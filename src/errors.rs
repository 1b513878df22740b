use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::decimal::Money;
use crate::types::{AccountId, LoanId, LoanStatus, Role};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LendingError {
    #[error("operation requires the {required} role")]
    Unauthorized {
        required: Role,
    },

    #[error("account {account} is already registered as {role}")]
    AlreadyRegistered {
        account: AccountId,
        role: Role,
    },

    #[error("loan {id} not found for borrower {borrower}")]
    LoanNotFound {
        borrower: AccountId,
        id: LoanId,
    },

    #[error("loan {id} does not belong to the caller")]
    NotBorrower {
        id: LoanId,
    },

    #[error("transition not allowed: loan is currently {current}")]
    InvalidState {
        current: LoanStatus,
    },

    #[error("insufficient collateral: available {available}, requested {requested}")]
    InsufficientCollateral {
        available: Money,
        requested: Money,
    },

    #[error("repayment window closed: deadline {deadline}, current time {now}")]
    DeadlinePassed {
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("deadline not reached: deadline {deadline}, current time {now}")]
    DeadlineNotReached {
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("insufficient treasury funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Money,
        requested: Money,
    },
}

pub type Result<T> = std::result::Result<T, LendingError>;
