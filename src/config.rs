// 7.0 config.rs: all settings in one place. starting price, owner, supply, event retention.
// 7.1 Environment presets at the bottom.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::CUSTODY_ACCOUNT;
use crate::types::{AccountId, Price, Quote};

/// 1000000^4 collateral units.
pub fn default_initial_supply() -> Quote {
    Quote::new(Decimal::from_i128_with_scale(1_000_000_000_000_000_000_000_000, 0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    // Reference price at creation
    pub initial_price: Price,
    // Account credited with the whole initial supply; also the price operator
    pub owner: AccountId,
    // Units minted to the owner at creation
    pub initial_supply: Quote,
    // Maximum number of events kept in memory
    pub max_events: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_price: Price::new_unchecked(Decimal::from(1000)),
            owner: AccountId(1),
            initial_supply: default_initial_supply(),
            max_events: 100_000,
        }
    }
}

impl LedgerConfig {
    pub fn with_initial_price(mut self, price: Price) -> Self {
        self.initial_price = price;
        self
    }

    pub fn with_owner(mut self, owner: AccountId) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_initial_supply(mut self, supply: Quote) -> Self {
        self.initial_supply = supply;
        self
    }

    // Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner == CUSTODY_ACCOUNT {
            return Err(ConfigError::ReservedOwner(self.owner));
        }

        if self.initial_supply.is_negative() || !self.initial_supply.is_whole() {
            return Err(ConfigError::InvalidSupply(self.initial_supply));
        }

        // deserialized prices bypass Price::new
        if Price::new(self.initial_price.value()).is_none() {
            return Err(ConfigError::InvalidPrice(self.initial_price));
        }

        if self.max_events == 0 {
            return Err(ConfigError::NoEventRetention);
        }

        Ok(())
    }
}

// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Owner {0} collides with the custody account")]
    ReservedOwner(AccountId),

    #[error("Initial supply {0} must be a non-negative whole number")]
    InvalidSupply(Quote),

    #[error("Initial price {0} must be a positive whole number")]
    InvalidPrice(Price),

    #[error("max_events must be at least 1")]
    NoEventRetention,
}

// Environment presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Testnet,
}

impl Environment {
    pub fn config(&self) -> LedgerConfig {
        match self {
            Environment::Development => LedgerConfig::default(),
            // smaller log, same economics
            Environment::Testnet => LedgerConfig {
                max_events: 10_000,
                ..LedgerConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_valid() {
        let config = LedgerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_price.value(), dec!(1000));
        assert_eq!(
            config.initial_supply.value(),
            dec!(1_000_000) * dec!(1_000_000) * dec!(1_000_000) * dec!(1_000_000)
        );
    }

    #[test]
    fn test_owner_cannot_be_custody() {
        let config = LedgerConfig::default().with_owner(CUSTODY_ACCOUNT);
        assert_eq!(config.validate(), Err(ConfigError::ReservedOwner(CUSTODY_ACCOUNT)));
    }

    #[test]
    fn test_fractional_supply_rejected() {
        let config = LedgerConfig::default().with_initial_supply(Quote::new(dec!(10.5)));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSupply(_))));
    }

    #[test]
    fn test_deserialized_bad_price_rejected() {
        let mut config = LedgerConfig::default();
        config.initial_price = Price::new_unchecked(dec!(0.5));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPrice(_))));
    }

    #[test]
    fn test_environment_presets() {
        assert!(Environment::Development.config().validate().is_ok());
        assert!(Environment::Testnet.config().validate().is_ok());
        assert_eq!(Environment::Testnet.config().max_events, 10_000);
    }

    #[test]
    fn test_config_serialization() {
        let config = LedgerConfig::default().with_initial_price(Price::from_units(1200).unwrap());
        let json = serde_json::to_string(&config).unwrap();
        let back: LedgerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.initial_price, config.initial_price);
        assert_eq!(back.initial_supply, config.initial_supply);
        assert_eq!(back.owner, config.owner);
    }
}
