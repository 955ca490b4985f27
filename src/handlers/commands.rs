//! Command definitions
//!
//! Commands carry already-parsed request data into the ledger handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountId, Money};

// =========================================================================
// CreateAccountCommand
// =========================================================================

/// Command to open a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountCommand {
    pub account_id: AccountId,
    pub initial_balance: Money,
}

impl CreateAccountCommand {
    pub fn new(account_id: AccountId, initial_balance: Money) -> Self {
        Self {
            account_id,
            initial_balance,
        }
    }
}

// =========================================================================
// TransferCommand
// =========================================================================

/// Command to move funds between two accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Money,
}

impl TransferCommand {
    pub fn new(from_account_id: AccountId, to_account_id: AccountId, amount: Money) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
        }
    }

    pub fn is_self_transfer(&self) -> bool {
        self.from_account_id == self.to_account_id
    }
}

/// Result of a successful transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResult {
    pub transfer_id: Uuid,
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Money,
    pub status: String,
    pub completed_at: DateTime<Utc>,
}
