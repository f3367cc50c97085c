//! In-memory account ledger with a revertible journal.
//!
//! Every mutation is appended to a journal holding the account's prior
//! balance, so a caller wrapping a transaction can take a [`Snapshot`]
//! before execution and revert to it if execution fails. This is the
//! commit/rollback boundary the transfer relies on; the transfer itself
//! never reverts anything.

use primitive_types::{H160, U256};
use std::collections::HashMap;
use tracing::trace;

use crate::{
    error::LedgerError,
    hook::{BalanceChange, BalanceHook, NoopHook},
    ledger::{BalanceChangeReason, Ledger},
};

/// Position in the journal returned by [`MemoryLedger::snapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Snapshot(usize);

impl Snapshot {
    pub fn id(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct JournalEntry {
    address: H160,
    /// `None` when the account did not exist before the mutation.
    previous: Option<U256>,
}

/// HashMap-backed [`Ledger`].
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger<H = NoopHook> {
    balances: HashMap<H160, U256>,
    journal: Vec<JournalEntry>,
    hook: H,
}

impl MemoryLedger<NoopHook> {
    /// Empty ledger that reports to nothing.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: BalanceHook> MemoryLedger<H> {
    /// Empty ledger reporting every mutation to `hook`.
    pub fn with_hook(hook: H) -> Self {
        Self {
            balances: HashMap::new(),
            journal: Vec::new(),
            hook,
        }
    }

    /// Set a balance outright, e.g. for genesis allocation.
    ///
    /// Not journaled and not reported to the hook.
    pub fn set_balance(&mut self, address: H160, amount: U256) {
        if amount.is_zero() {
            self.balances.remove(&address);
        } else {
            self.balances.insert(address, amount);
        }
    }

    /// Sum of all balances. Returns `None` if the sum exceeds `U256::MAX`.
    pub fn total_supply(&self) -> Option<U256> {
        self.balances
            .values()
            .try_fold(U256::zero(), |acc, b| acc.checked_add(*b))
    }

    /// Number of accounts holding a non-zero balance.
    pub fn len(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Mark the current journal position.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.journal.len())
    }

    /// Undo every mutation applied after `snapshot`, newest first.
    ///
    /// Reverted mutations are not reported to the hook.
    pub fn revert_to_snapshot(&mut self, snapshot: Snapshot) -> Result<(), LedgerError> {
        if snapshot.0 > self.journal.len() {
            return Err(LedgerError::InvalidSnapshot {
                id: snapshot.0,
                journal_len: self.journal.len(),
            });
        }

        let reverted = self.journal.len() - snapshot.0;
        for entry in self.journal.drain(snapshot.0..).rev() {
            match entry.previous {
                Some(previous) => {
                    self.balances.insert(entry.address, previous);
                }
                None => {
                    self.balances.remove(&entry.address);
                }
            }
        }

        trace!(snapshot = snapshot.0, reverted, "Reverted ledger to snapshot");
        Ok(())
    }

    /// Discard the journal. Earlier snapshots become invalid.
    pub fn commit(&mut self) {
        self.journal.clear();
    }

    fn apply(&mut self, address: H160, current: U256, reason: BalanceChangeReason) {
        let previous = self.balances.insert(address, current);
        self.journal.push(JournalEntry { address, previous });
        self.hook.on_balance_change(&BalanceChange {
            address,
            previous: previous.unwrap_or_default(),
            current,
            reason,
        });
    }
}

impl<H: BalanceHook> Ledger for MemoryLedger<H> {
    type Error = LedgerError;

    fn balance(&self, address: H160) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    fn sub_balance(
        &mut self,
        address: H160,
        amount: U256,
        reason: BalanceChangeReason,
    ) -> Result<(), LedgerError> {
        let balance = self.balance(address);
        let current = balance
            .checked_sub(amount)
            .ok_or(LedgerError::BalanceUnderflow {
                address,
                balance,
                amount,
            })?;
        self.apply(address, current, reason);
        Ok(())
    }

    fn add_balance(
        &mut self,
        address: H160,
        amount: U256,
        reason: BalanceChangeReason,
    ) -> Result<(), LedgerError> {
        let balance = self.balance(address);
        let current = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow {
                address,
                balance,
                amount,
            })?;
        self.apply(address, current, reason);
        Ok(())
    }
}
