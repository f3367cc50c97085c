use anyhow::{Context, Result};
use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Denominator of [`TaxConfig::tax_rate`]; rates are whole percentage points.
pub const TAX_RATE_DENOMINATOR: u64 = 100;

/// Largest valid [`TaxConfig::tax_rate`].
pub const MAX_TAX_RATE: u64 = TAX_RATE_DENOMINATOR;

/// Parameters of the transfer tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Whether transfers are taxed at all
    #[serde(default)]
    pub tax_enabled: bool,

    /// Percentage of each taxed transfer sent to the treasury (0-100)
    #[serde(default)]
    pub tax_rate: u64,

    /// Account receiving the tax
    #[serde(default)]
    pub treasury_address: H160,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            tax_enabled: false,
            tax_rate: 0,
            treasury_address: H160::zero(),
        }
    }
}

impl TaxConfig {
    /// Enabled tax config sending `tax_rate` percent to `treasury_address`.
    pub fn new(tax_rate: u64, treasury_address: H160) -> Self {
        Self {
            tax_enabled: true,
            tax_rate,
            treasury_address,
        }
    }

    /// Disabled tax config.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Check the bounds the transfer assumes.
    ///
    /// A disabled config is only checked for its rate, so a chain can carry a
    /// prepared rate before turning the tax on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tax_rate > MAX_TAX_RATE {
            return Err(ConfigError::TaxRateOutOfRange {
                rate: self.tax_rate,
            });
        }

        if self.tax_enabled && self.treasury_address.is_zero() {
            return Err(ConfigError::MissingTreasury);
        }

        Ok(())
    }

    /// Tax owed on `amount` at the configured rate, ignoring exemptions.
    pub fn tax_on(&self, amount: U256) -> U256 {
        crate::transfer::split_amount(amount, self.tax_rate).tax
    }
}

/// Chain-level configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Numeric chain identifier
    pub chain_id: u64,

    /// Transfer tax parameters
    #[serde(default)]
    pub tax: TaxConfig,
}

impl ChainConfig {
    pub fn new(chain_id: u64, tax: TaxConfig) -> Self {
        Self { chain_id, tax }
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse chain config")?;
        config.tax.validate().context("Invalid tax config")?;
        Ok(config)
    }

    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        self.tax.validate().context("Refusing to save invalid tax config")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }
}
