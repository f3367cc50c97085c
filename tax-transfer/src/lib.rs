//! Native-currency transfers with an optional treasury tax.
//!
//! Every value transfer on the account ledger goes through [`transfer`].
//! When the chain enables the tax, a fixed percentage of each transfer is
//! credited to a treasury account instead of the recipient:
//!
//! | Party     | Taxed transfer      | Exempt transfer |
//! |-----------|---------------------|-----------------|
//! | Sender    | −amount             | −amount         |
//! | Recipient | +(amount − tax)     | +amount         |
//! | Treasury  | +tax                | untouched       |
//!
//! Value is conserved either way: the deltas always sum to zero.
//!
//! ## Key Concepts
//!
//! - **Ledger**: any store implementing [`Ledger`]. The transfer issues
//!   debits and credits through it and never reads balances.
//! - **Hook**: every applied mutation is reported to a [`BalanceHook`] with
//!   a [`BalanceChangeReason`].
//! - **Exemption**: transfers from or to the treasury, to the block's
//!   coinbase, of zero value, or with the tax disabled move the exact amount.
//! - **Snapshot**: [`MemoryLedger`] journals mutations so the enclosing
//!   transaction can revert a partially applied transfer.

mod config;
mod error;
mod hook;
mod ledger;
mod memory;
mod transfer;

pub use config::{ChainConfig, TaxConfig, MAX_TAX_RATE, TAX_RATE_DENOMINATOR};
pub use error::{ConfigError, LedgerError};
pub use hook::{BalanceChange, BalanceHook, NoopHook, RecordingHook, TracingHook};
pub use ledger::{can_transfer, BalanceChangeReason, Ledger};
pub use memory::{MemoryLedger, Snapshot};
pub use transfer::{
    split_amount, transfer, BlockContext, Exemption, TaxSplit, TransferReceipt,
};

pub use primitive_types::{H160 as Address, U256};
