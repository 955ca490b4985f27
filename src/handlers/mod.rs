//! Command Handlers module
//!
//! Translate validated commands into ledger calls and ledger results into
//! responses the API layer can encode.

mod account_handler;
mod commands;
mod transfer_handler;

pub use account_handler::{AccountQueryHandler, CreateAccountHandler};
pub use commands::*;
pub use transfer_handler::TransferHandler;
