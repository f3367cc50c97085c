//! Observability hooks invoked on every balance mutation.

use primitive_types::{H160, U256};
use tracing::debug;

use crate::ledger::BalanceChangeReason;

/// A single applied balance mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceChange {
    /// Account whose balance changed.
    pub address: H160,

    /// Balance before the mutation.
    pub previous: U256,

    /// Balance after the mutation.
    pub current: U256,

    /// Why the balance changed.
    pub reason: BalanceChangeReason,
}

impl BalanceChange {
    /// True if the reason is [`BalanceChangeReason::TransferIncrement`].
    pub fn is_increment(&self) -> bool {
        self.reason == BalanceChangeReason::TransferIncrement
    }

    /// Absolute size of the change.
    pub fn magnitude(&self) -> U256 {
        if self.current >= self.previous {
            self.current - self.previous
        } else {
            self.previous - self.current
        }
    }
}

/// Receives every balance mutation a ledger applies.
pub trait BalanceHook {
    fn on_balance_change(&mut self, change: &BalanceChange);
}

/// Discards all changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHook;

impl BalanceHook for NoopHook {
    fn on_balance_change(&mut self, _change: &BalanceChange) {}
}

/// Emits a `debug` event per change.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingHook;

impl BalanceHook for TracingHook {
    fn on_balance_change(&mut self, change: &BalanceChange) {
        debug!(
            address = ?change.address,
            previous = %change.previous,
            current = %change.current,
            reason = %change.reason,
            "Balance changed"
        );
    }
}

/// Keeps every change in the order it was applied.
#[derive(Clone, Debug, Default)]
pub struct RecordingHook {
    changes: Vec<BalanceChange>,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes recorded so far, oldest first.
    pub fn changes(&self) -> &[BalanceChange] {
        &self.changes
    }

    /// Changes touching `address`, oldest first.
    pub fn changes_for(&self, address: H160) -> impl Iterator<Item = &BalanceChange> + '_ {
        self.changes.iter().filter(move |c| c.address == address)
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

impl BalanceHook for RecordingHook {
    fn on_balance_change(&mut self, change: &BalanceChange) {
        self.changes.push(change.clone());
    }
}
