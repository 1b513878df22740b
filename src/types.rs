use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for an account (principal, lender agent, or client)
pub type AccountId = Uuid;

/// per-client loan identifier, 1-based and gap-free
pub type LoanId = u64;

/// the three roles an account can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Principal,
    LenderAgent,
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Principal => write!(f, "principal"),
            Role::LenderAgent => write!(f, "lender agent"),
            Role::Client => write!(f, "activated client"),
        }
    }
}

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// requested by the client, awaiting a lender agent's decision
    Requested,
    /// approved, running against its deadline
    Approved,
    /// repaid by the borrower at or before the deadline
    Repaid,
    /// collateral seized by a lender agent after the deadline
    Liquidated,
}

impl LoanStatus {
    /// repaid and liquidated loans never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Repaid | LoanStatus::Liquidated)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanStatus::Requested => write!(f, "requested"),
            LoanStatus::Approved => write!(f, "approved"),
            LoanStatus::Repaid => write!(f, "repaid"),
            LoanStatus::Liquidated => write!(f, "liquidated"),
        }
    }
}

/// a single loan record
///
/// `deadline` is `None` exactly while the loan is `Requested`; approval
/// stamps it with `approval time + term` and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub borrower: AccountId,
    pub amount: Money,
    pub term_secs: u32,
    pub requested_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: LoanStatus,
}

impl Loan {
    /// loan term as a chrono duration
    pub fn term(&self) -> Duration {
        Duration::seconds(self.term_secs as i64)
    }
}
