//! fund_ledger Library
//!
//! In-memory account ledger with atomic, deadlock-free transfers, plus the
//! HTTP boundary that exposes it.

pub mod api;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod ledger;
pub mod telemetry;

mod error;

pub use config::Config;
pub use domain::{Account, AccountId, LedgerError, Money, MoneyError};
pub use error::{AppError, AppResult};
pub use ledger::Ledger;
