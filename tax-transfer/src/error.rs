//! Error types for ledger mutation and tax configuration.

use primitive_types::{H160, U256};
use thiserror::Error;

/// Errors raised by [`MemoryLedger`](crate::MemoryLedger) mutations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Balance underflow for {address:?}: have {balance}, debit {amount}")]
    BalanceUnderflow {
        address: H160,
        balance: U256,
        amount: U256,
    },

    #[error("Balance overflow for {address:?}: have {balance}, credit {amount}")]
    BalanceOverflow {
        address: H160,
        balance: U256,
        amount: U256,
    },

    #[error("Invalid snapshot {id}: journal holds {journal_len} entries")]
    InvalidSnapshot { id: usize, journal_len: usize },
}

/// Errors raised while validating a [`TaxConfig`](crate::TaxConfig).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Tax rate {rate} exceeds 100 percent")]
    TaxRateOutOfRange { rate: u64 },

    #[error("Tax is enabled but no treasury address is set")]
    MissingTreasury,
}
