//! Ledger Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::MoneyError;

/// Errors reported by ledger operations.
///
/// Every variant is an expected, local condition. An operation that returns
/// one of these has made no change to any balance.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    /// Malformed or negative amount, or a credit outside the representable range
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Empty or blank account identifier
    #[error("Invalid account id: {0:?}")]
    InvalidAccountId(String),

    /// Create on an id that already exists
    #[error("Account id {0} already exists!")]
    DuplicateAccountId(String),

    /// Operation on an unknown id
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Debit would take the balance below zero
    #[error("Account id {account_id} does not have enough funds: required {required}, available {available}")]
    InsufficientFunds {
        account_id: String,
        required: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    },
}

impl LedgerError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(
        account_id: impl Into<String>,
        required: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    ) -> Self {
        Self::InsufficientFunds {
            account_id: account_id.into(),
            required,
            available,
        }
    }

    /// Check if this error is caused by malformed input
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidAmount(_) | Self::InvalidAccountId(_))
    }
}

impl From<MoneyError> for LedgerError {
    fn from(err: MoneyError) -> Self {
        Self::InvalidAmount(err.to_string())
    }
}
