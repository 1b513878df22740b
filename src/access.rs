use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{LendingError, Result};
use crate::types::{AccountId, Role};

/// three-tier role registry: principal, lender agents, activated clients
///
/// the principal is fixed at construction and doubles as a lender agent, so
/// it can register clients and decide loans without a separate enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessControlRegistry {
    principal: AccountId,
    lender_agents: HashSet<AccountId>,
    clients: HashSet<AccountId>,
}

impl AccessControlRegistry {
    /// create a registry owned by the given principal
    pub fn new(principal: AccountId) -> Self {
        let mut lender_agents = HashSet::new();
        lender_agents.insert(principal);

        Self {
            principal,
            lender_agents,
            clients: HashSet::new(),
        }
    }

    /// the administrative account
    pub fn principal(&self) -> AccountId {
        self.principal
    }

    pub fn is_lender_agent(&self, account: AccountId) -> bool {
        self.lender_agents.contains(&account)
    }

    pub fn is_activated_client(&self, account: AccountId) -> bool {
        self.clients.contains(&account)
    }

    /// enroll a new lender agent; principal only
    pub fn register_lender(&mut self, caller: AccountId, candidate: AccountId) -> Result<()> {
        self.require_principal(caller)?;

        if self.lender_agents.contains(&candidate) {
            return Err(LendingError::AlreadyRegistered {
                account: candidate,
                role: Role::LenderAgent,
            });
        }

        self.lender_agents.insert(candidate);
        Ok(())
    }

    /// activate a new client with zero collateral and no loans; lender agents only
    pub fn register_client(&mut self, caller: AccountId, candidate: AccountId) -> Result<()> {
        self.require_lender_agent(caller)?;

        if self.clients.contains(&candidate) {
            return Err(LendingError::AlreadyRegistered {
                account: candidate,
                role: Role::Client,
            });
        }

        self.clients.insert(candidate);
        Ok(())
    }

    pub fn require_principal(&self, caller: AccountId) -> Result<()> {
        if caller != self.principal {
            return Err(LendingError::Unauthorized {
                required: Role::Principal,
            });
        }
        Ok(())
    }

    pub fn require_lender_agent(&self, caller: AccountId) -> Result<()> {
        if !self.lender_agents.contains(&caller) {
            return Err(LendingError::Unauthorized {
                required: Role::LenderAgent,
            });
        }
        Ok(())
    }

    pub fn require_activated_client(&self, caller: AccountId) -> Result<()> {
        if !self.clients.contains(&caller) {
            return Err(LendingError::Unauthorized {
                required: Role::Client,
            });
        }
        Ok(())
    }

    /// activated clients, unordered
    pub fn clients(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.clients.iter().copied()
    }

    /// enrolled lender agents, unordered
    pub fn lender_agents(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.lender_agents.iter().copied()
    }
}
