use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{AccountId, Loan};

/// serializable view of a single client's record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientView {
    pub account: AccountId,
    pub activated: bool,
    pub collateral_balance: Money,
    /// loans in creation order
    pub loans: Vec<Loan>,
}

/// serializable view of the whole ledger
///
/// clients and lender agents are sorted by account id so repeated captures
/// of the same state serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerView {
    pub principal: AccountId,
    pub lender_agents: Vec<AccountId>,
    pub clients: Vec<ClientView>,
}

impl LedgerView {
    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// state snapshot for audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub snapshot_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub trigger: String,
    pub state: LedgerView,
}

impl EngineSnapshot {
    pub fn capture(state: LedgerView, trigger: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            snapshot_id: Uuid::new_v4(),
            timestamp,
            trigger,
            state,
        }
    }
}
