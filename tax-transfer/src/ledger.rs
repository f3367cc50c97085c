//! Ledger capability consumed by the transfer.
//!
//! The transfer never touches balances directly. It goes through
//! [`Ledger::sub_balance`] and [`Ledger::add_balance`], and each
//! implementation decides how a mutation is stored, journaled, and reported
//! to its [`BalanceHook`](crate::BalanceHook).

use primitive_types::{H160, U256};
use std::fmt;

/// Classification attached to every balance mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BalanceChangeReason {
    /// Value leaving an account as part of a transfer.
    TransferDecrement,

    /// Value arriving at an account as part of a transfer.
    TransferIncrement,
}

impl BalanceChangeReason {
    /// Whether the change belongs to a value transfer.
    pub fn is_transfer(self) -> bool {
        matches!(self, Self::TransferDecrement | Self::TransferIncrement)
    }
}

impl fmt::Display for BalanceChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransferDecrement => write!(f, "transfer_decrement"),
            Self::TransferIncrement => write!(f, "transfer_increment"),
        }
    }
}

/// Account-balance store the transfer mutates.
///
/// Implementations must apply each call as a single unconditional mutation
/// and report it to their observability hook. Atomicity across several
/// calls belongs to the caller (see [`MemoryLedger::snapshot`](crate::MemoryLedger::snapshot)).
#[cfg_attr(test, mockall::automock(type Error = crate::LedgerError;))]
pub trait Ledger {
    /// Error surfaced by a failed mutation.
    type Error;

    /// Current balance of `address`. Unknown accounts hold zero.
    fn balance(&self, address: H160) -> U256;

    /// Remove `amount` from `address`.
    fn sub_balance(
        &mut self,
        address: H160,
        amount: U256,
        reason: BalanceChangeReason,
    ) -> Result<(), Self::Error>;

    /// Add `amount` to `address`.
    fn add_balance(
        &mut self,
        address: H160,
        amount: U256,
        reason: BalanceChangeReason,
    ) -> Result<(), Self::Error>;
}

/// Returns true if `from` holds at least `amount`.
///
/// Sufficiency is checked by transaction validation before a transfer runs;
/// the transfer itself never calls this.
pub fn can_transfer<L: Ledger + ?Sized>(ledger: &L, from: H160, amount: U256) -> bool {
    ledger.balance(from) >= amount
}
