//! Domain module
//!
//! Core domain types: money, account identity and the ledger error taxonomy.

pub mod account;
pub mod error;
pub mod money;

pub use account::{Account, AccountId};
pub use error::LedgerError;
pub use money::{Money, MoneyError};
