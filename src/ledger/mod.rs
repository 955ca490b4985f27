//! Ledger module
//!
//! The account store and the transfer protocol.

mod coordinator;
mod store;


pub use store::{Ledger, LedgerResult};
