//! Account store
//!
//! The `Ledger` owns every account and is the only place balances change.
//!
//! Locking:
//! - the id → account table sits behind a `RwLock` that is written only for
//!   structural changes (insert, clear) and read to resolve ids
//! - each account has its own balance lock; reads and transfers hold only
//!   the account locks they need, never the table lock

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{Account, AccountId, LedgerError, Money};

use super::coordinator::{lock_pair, AccountCell};

/// Ledger result type
pub type LedgerResult<T> = Result<T, LedgerError>;

/// In-memory ledger of accounts.
///
/// Shared between threads behind an `Arc`; every method takes `&self`.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: RwLock<HashMap<AccountId, Arc<AccountCell>>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // CreateAccount
    // =========================================================================

    /// Insert a new account if `id` is not taken.
    ///
    /// The existence check and the insert happen under one write lock, so two
    /// concurrent creates for the same id cannot both succeed.
    pub fn create_account(&self, id: AccountId, initial_balance: Money) -> LedgerResult<()> {
        let mut accounts = self.accounts.write();
        match accounts.entry(id) {
            Entry::Occupied(entry) => {
                tracing::warn!(account_id = %entry.key(), "Rejected duplicate account id");
                Err(LedgerError::DuplicateAccountId(entry.key().to_string()))
            }
            Entry::Vacant(entry) => {
                let cell = AccountCell::new(entry.key().clone(), initial_balance);
                tracing::debug!(account_id = %entry.key(), balance = %initial_balance, "Account created");
                entry.insert(Arc::new(cell));
                Ok(())
            }
        }
    }

    // =========================================================================
    // GetAccount
    // =========================================================================

    /// Point-in-time copy of one account.
    pub fn get_account(&self, id: &AccountId) -> LedgerResult<Account> {
        Ok(self.resolve(id)?.snapshot())
    }

    /// Snapshots of every account, each consistent on its own.
    pub fn list_accounts(&self) -> Vec<Account> {
        let cells: Vec<Arc<AccountCell>> = self.accounts.read().values().cloned().collect();
        let mut accounts: Vec<Account> = cells.iter().map(|cell| cell.snapshot()).collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }

    // =========================================================================
    // Transfer
    // =========================================================================

    /// Move `amount` from one account to another as a single atomic step.
    ///
    /// Both account locks are held, in id order, while the debit and the
    /// credit are computed and written. On any error neither balance changes.
    /// A transfer from an account to itself only checks that it exists.
    pub fn transfer(&self, from_id: &AccountId, to_id: &AccountId, amount: Money) -> LedgerResult<()> {
        let (from, to) = {
            let accounts = self.accounts.read();
            (
                Self::lookup(&accounts, from_id)?,
                Self::lookup(&accounts, to_id)?,
            )
        };

        if from.id() == to.id() {
            tracing::debug!(account_id = %from_id, amount = %amount, "Self-transfer, nothing to move");
            return Ok(());
        }

        let mut guard = lock_pair(&from, &to);

        let Some(new_from) = guard.from.checked_sub(&amount) else {
            tracing::warn!(
                from = %from_id,
                to = %to_id,
                amount = %amount,
                available = %guard.from.value(),
                "Transfer rejected: insufficient funds"
            );
            return Err(LedgerError::insufficient_funds(
                from_id.as_str(),
                amount.value(),
                guard.from.value(),
            ));
        };
        let new_to = guard.to.checked_add(&amount).ok_or_else(|| {
            LedgerError::InvalidAmount(format!("credit to {to_id} exceeds the representable range"))
        })?;

        *guard.from = new_from;
        *guard.to = new_to;
        drop(guard);

        tracing::debug!(from = %from_id, to = %to_id, amount = %amount, "Transfer completed");
        Ok(())
    }

    // =========================================================================
    // Single-account mutations
    // =========================================================================

    /// Add `amount` to an account's balance.
    pub fn deposit(&self, id: &AccountId, amount: Money) -> LedgerResult<Money> {
        let cell = self.resolve(id)?;
        let mut balance = cell.lock();
        let new_balance = balance.checked_add(&amount).ok_or_else(|| {
            LedgerError::InvalidAmount(format!("deposit to {id} exceeds the representable range"))
        })?;
        *balance = new_balance;
        Ok(new_balance)
    }

    /// Take `amount` from an account's balance, refusing to go below zero.
    pub fn withdraw(&self, id: &AccountId, amount: Money) -> LedgerResult<Money> {
        let cell = self.resolve(id)?;
        let mut balance = cell.lock();
        let new_balance = balance
            .checked_sub(&amount)
            .ok_or_else(|| LedgerError::insufficient_funds(id.as_str(), amount.value(), balance.value()))?;
        *balance = new_balance;
        Ok(new_balance)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }

    /// Sum of all balances.
    ///
    /// Accounts are read one at a time, so the total is only meaningful when
    /// no transfer is in flight. Fails with `InvalidAmount` when the sum
    /// leaves the representable range.
    pub fn total_balance(&self) -> LedgerResult<Money> {
        self.list_accounts()
            .iter()
            .try_fold(Money::ZERO, |total, account| {
                total.checked_add(&account.balance()).ok_or_else(|| {
                    LedgerError::InvalidAmount(format!(
                        "total balance exceeds the representable range at account {}",
                        account.id()
                    ))
                })
            })
    }

    /// Remove every account. Test isolation only.
    pub fn clear_all(&self) {
        let mut accounts = self.accounts.write();
        let removed = accounts.len();
        accounts.clear();
        tracing::debug!(removed, "Ledger cleared");
    }

    fn resolve(&self, id: &AccountId) -> LedgerResult<Arc<AccountCell>> {
        Self::lookup(&self.accounts.read(), id)
    }

    fn lookup(
        accounts: &HashMap<AccountId, Arc<AccountCell>>,
        id: &AccountId,
    ) -> LedgerResult<Arc<AccountCell>> {
        accounts
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
    }
}
