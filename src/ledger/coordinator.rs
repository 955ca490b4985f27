//! Transfer Coordinator
//!
//! Per-account balance cells and the lock ordering used whenever two of
//! them must be held at once.
//!
//! Two cells are always locked in ascending `AccountId` order, whatever the
//! direction of the transfer. Opposite-direction transfers over the same pair
//! therefore contend for the same first lock instead of each holding one and
//! waiting for the other.

use parking_lot::{Mutex, MutexGuard};

use crate::domain::{Account, AccountId, Money};

/// Live state of one account.
///
/// The id sits outside the lock so it can be read to decide lock order
/// without taking the lock.
#[derive(Debug)]
pub(crate) struct AccountCell {
    id: AccountId,
    balance: Mutex<Money>,
}

impl AccountCell {
    pub(crate) fn new(id: AccountId, balance: Money) -> Self {
        Self {
            id,
            balance: Mutex::new(balance),
        }
    }

    pub(crate) fn id(&self) -> &AccountId {
        &self.id
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Money> {
        self.balance.lock()
    }

    /// Copy id and balance under the cell lock.
    pub(crate) fn snapshot(&self) -> Account {
        let balance = *self.balance.lock();
        Account::new(self.id.clone(), balance)
    }
}

/// Guards over two distinct cells, in the caller's (from, to) order.
pub(crate) struct PairGuard<'a> {
    pub(crate) from: MutexGuard<'a, Money>,
    pub(crate) to: MutexGuard<'a, Money>,
}

/// Lock two distinct cells in canonical order.
///
/// The guards come back labelled by role, not by acquisition order. Callers
/// must not pass the same cell twice; `parking_lot::Mutex` is not reentrant.
pub(crate) fn lock_pair<'a>(from: &'a AccountCell, to: &'a AccountCell) -> PairGuard<'a> {
    debug_assert_ne!(from.id(), to.id(), "lock_pair called with a single account");

    if from.id() < to.id() {
        let from_guard = from.lock();
        let to_guard = to.lock();
        PairGuard {
            from: from_guard,
            to: to_guard,
        }
    } else {
        let to_guard = to.lock();
        let from_guard = from.lock();
        PairGuard {
            from: from_guard,
            to: to_guard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn cell(id: &str, units: u64) -> Arc<AccountCell> {
        Arc::new(AccountCell::new(AccountId::new(id).unwrap(), Money::from_units(units)))
    }

    #[test]
    fn test_lock_pair_returns_guards_by_role() {
        let a = cell("A", 1);
        let b = cell("B", 2);

        // "B" > "A": the to-side is acquired first, labels must not swap
        let guard = lock_pair(&b, &a);
        assert_eq!(*guard.from, Money::from_units(2));
        assert_eq!(*guard.to, Money::from_units(1));
    }

    #[test]
    fn test_snapshot_copies_balance() {
        let a = cell("A", 10);
        let snapshot = a.snapshot();
        *a.lock() = Money::from_units(3);

        assert_eq!(snapshot.balance(), Money::from_units(10));
        assert_eq!(a.snapshot().balance(), Money::from_units(3));
    }

    #[test]
    fn test_opposite_direction_locking_completes() {
        let a = cell("A", 0);
        let b = cell("B", 0);
        let (done_tx, done_rx) = mpsc::channel();

        for worker in 0..8 {
            let (a, b, done_tx) = (a.clone(), b.clone(), done_tx.clone());
            thread::spawn(move || {
                for _ in 0..10_000 {
                    let (from, to) = if worker % 2 == 0 { (&a, &b) } else { (&b, &a) };
                    let guard = lock_pair(from, to);
                    drop(guard);
                }
                done_tx.send(()).unwrap();
            });
        }
        drop(done_tx);

        for _ in 0..8 {
            done_rx
                .recv_timeout(Duration::from_secs(30))
                .expect("lock_pair deadlocked");
        }
    }
}
