//! Account Handlers
//!
//! Open accounts and read account snapshots.

use std::sync::Arc;

use crate::domain::{Account, AccountId};
use crate::error::AppError;
use crate::ledger::Ledger;

use super::CreateAccountCommand;

/// Handler for account creation
pub struct CreateAccountHandler {
    ledger: Arc<Ledger>,
}

impl CreateAccountHandler {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Execute the create command and return the new account's snapshot
    pub fn execute(&self, command: CreateAccountCommand) -> Result<Account, AppError> {
        self.ledger
            .create_account(command.account_id.clone(), command.initial_balance)?;

        tracing::info!(
            account_id = %command.account_id,
            balance = %command.initial_balance,
            "Account opened"
        );

        Ok(Account::new(command.account_id, command.initial_balance))
    }
}

/// Handler for account reads
pub struct AccountQueryHandler {
    ledger: Arc<Ledger>,
}

impl AccountQueryHandler {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    pub fn get(&self, account_id: &AccountId) -> Result<Account, AppError> {
        Ok(self.ledger.get_account(account_id)?)
    }

    pub fn list(&self) -> Vec<Account> {
        self.ledger.list_accounts()
    }
}
