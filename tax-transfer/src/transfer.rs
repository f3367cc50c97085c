//! Native-currency transfer with treasury tax.
//!
//! A taxed transfer debits the sender the full nominal amount and splits
//! it between the recipient and the treasury:
//!
//! ```text
//! tax = floor(amount × tax_rate / 100)
//! net = amount − tax
//! ```
//!
//! The product is formed at 512 bits before dividing, so no amount can
//! overflow and the result truncates exactly once.
//!
//! ## Exemptions
//!
//! | Condition                 | Why                                      |
//! |---------------------------|------------------------------------------|
//! | tax disabled              | tax is inert                             |
//! | zero amount               | nothing to split                         |
//! | sender is the treasury    | treasury spending is not taxed           |
//! | recipient is the treasury | would tax value already going there      |
//! | recipient is the coinbase | block rewards reach miners untaxed       |
//!
//! An exempt transfer moves exactly `amount` and never touches the treasury.

use primitive_types::{H160, U256, U512};
use tracing::{debug, trace};

use crate::{
    config::{TaxConfig, MAX_TAX_RATE, TAX_RATE_DENOMINATOR},
    ledger::{BalanceChangeReason, Ledger},
};

/// Which exemption let a transfer through untaxed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Exemption {
    TaxDisabled,
    ZeroAmount,
    FromTreasury,
    ToTreasury,
    ToCoinbase,
}

/// Split of a taxed amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaxSplit {
    /// Portion sent to the treasury.
    pub tax: U256,

    /// Portion received by the recipient.
    pub net: U256,
}

/// Outcome of [`transfer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Nominal amount debited from the sender.
    pub amount: U256,

    /// Amount credited to the recipient.
    pub net: U256,

    /// Amount credited to the treasury.
    pub tax: U256,

    /// Set when the transfer bypassed the tax.
    pub exemption: Option<Exemption>,
}

impl TransferReceipt {
    pub fn is_taxed(&self) -> bool {
        self.exemption.is_none()
    }
}

impl TaxConfig {
    /// First exemption that applies to this transfer, if any.
    ///
    /// Conditions are checked in table order, so a zero-amount transfer to
    /// the coinbase reports [`Exemption::ZeroAmount`].
    pub fn exemption(
        &self,
        from: H160,
        to: H160,
        amount: U256,
        coinbase: H160,
    ) -> Option<Exemption> {
        if !self.tax_enabled {
            Some(Exemption::TaxDisabled)
        } else if amount.is_zero() {
            Some(Exemption::ZeroAmount)
        } else if from == self.treasury_address {
            Some(Exemption::FromTreasury)
        } else if to == self.treasury_address {
            Some(Exemption::ToTreasury)
        } else if to == coinbase {
            Some(Exemption::ToCoinbase)
        } else {
            None
        }
    }
}

/// Split `amount` at `tax_rate` percent, truncating the tax.
///
/// # Panics
///
/// Panics if `tax_rate` exceeds [`MAX_TAX_RATE`], in every build profile.
/// [`TaxConfig::validate`] rejects such rates when a config is loaded.
pub fn split_amount(amount: U256, tax_rate: u64) -> TaxSplit {
    assert!(tax_rate <= MAX_TAX_RATE, "tax rate {tax_rate} above 100");

    let product: U512 = amount.full_mul(U256::from(tax_rate));
    // At most `amount` once the rate is bounded.
    let tax = match U256::try_from(product / U512::from(TAX_RATE_DENOMINATOR)) {
        Ok(tax) => tax,
        Err(_) => unreachable!("tax exceeds a 256-bit amount"),
    };

    TaxSplit {
        tax,
        net: amount - tax,
    }
}

/// Move `amount` from `from` to `to`, diverting the configured tax to the
/// treasury unless an exemption applies.
///
/// The sender is always debited first, then the recipient credited, then
/// the treasury. Ledger errors are returned as-is; mutations already applied
/// are left in place for the caller's snapshot to revert.
///
/// # Panics
///
/// Panics on the taxed path if `config.tax_rate` exceeds [`MAX_TAX_RATE`],
/// before any mutation is issued. See [`split_amount`].
pub fn transfer<L: Ledger + ?Sized>(
    ledger: &mut L,
    from: H160,
    to: H160,
    amount: U256,
    config: &TaxConfig,
    coinbase: H160,
) -> Result<TransferReceipt, L::Error> {
    if let Some(exemption) = config.exemption(from, to, amount, coinbase) {
        trace!(?from, ?to, %amount, ?exemption, "Untaxed transfer");

        ledger.sub_balance(from, amount, BalanceChangeReason::TransferDecrement)?;
        ledger.add_balance(to, amount, BalanceChangeReason::TransferIncrement)?;

        return Ok(TransferReceipt {
            amount,
            net: amount,
            tax: U256::zero(),
            exemption: Some(exemption),
        });
    }

    let TaxSplit { tax, net } = split_amount(amount, config.tax_rate);
    debug!(
        ?from,
        ?to,
        treasury = ?config.treasury_address,
        %amount,
        %net,
        %tax,
        rate = config.tax_rate,
        "Taxed transfer"
    );

    ledger.sub_balance(from, amount, BalanceChangeReason::TransferDecrement)?;
    ledger.add_balance(to, net, BalanceChangeReason::TransferIncrement)?;
    ledger.add_balance(
        config.treasury_address,
        tax,
        BalanceChangeReason::TransferIncrement,
    )?;

    Ok(TransferReceipt {
        amount,
        net,
        tax,
        exemption: None,
    })
}

/// Execution context of the block a transfer runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockContext {
    /// Height of the block being executed.
    pub number: u64,

    /// Recipient of the block reward.
    pub coinbase: H160,
}

impl BlockContext {
    pub fn new(number: u64, coinbase: H160) -> Self {
        Self { number, coinbase }
    }

    /// [`transfer`] with this block's coinbase.
    pub fn transfer<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        from: H160,
        to: H160,
        amount: U256,
        config: &TaxConfig,
    ) -> Result<TransferReceipt, L::Error> {
        let _span = tracing::trace_span!("block", number = self.number).entered();
        transfer(ledger, from, to, amount, config, self.coinbase)
    }
}
