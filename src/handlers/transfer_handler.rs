//! Transfer Handler
//!
//! Runs a transfer through the ledger and builds the receipt.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::ledger::Ledger;

use super::{TransferCommand, TransferResult};

/// Handler for transfers between accounts
pub struct TransferHandler {
    ledger: Arc<Ledger>,
}

impl TransferHandler {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Execute the transfer command
    pub fn execute(&self, command: TransferCommand) -> Result<TransferResult, AppError> {
        let transfer_id = Uuid::new_v4();

        self.ledger
            .transfer(&command.from_account_id, &command.to_account_id, command.amount)
            .inspect_err(|e| {
                tracing::info!(
                    transfer_id = %transfer_id,
                    from = %command.from_account_id,
                    to = %command.to_account_id,
                    amount = %command.amount,
                    error = %e,
                    "Transfer refused"
                );
            })?;

        tracing::info!(
            transfer_id = %transfer_id,
            from = %command.from_account_id,
            to = %command.to_account_id,
            amount = %command.amount,
            self_transfer = command.is_self_transfer(),
            "Transfer completed"
        );

        Ok(TransferResult {
            transfer_id,
            from_account_id: command.from_account_id,
            to_account_id: command.to_account_id,
            amount: command.amount,
            status: "completed".to_string(),
            completed_at: Utc::now(),
        })
    }
}
