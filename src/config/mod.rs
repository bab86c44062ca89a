//! Configuration

use clap::Args;
use jiff::SignedDuration;
use rusty_money::{Findable, iso::Currency};
use thiserror::Error;

use crate::settings::ShopSettings;

pub mod logging;
pub mod shop;
pub mod storage;

pub use logging::{LogFormat, LoggingConfig};
pub use shop::ShopConfig;
pub use storage::StorageConfig;

/// Errors raised while turning configuration into settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Currency code is not a known ISO 4217 code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Notification timeout does not fit a duration
    #[error("notification timeout out of range: {0}s")]
    InvalidTimeout(u64),
}

/// BeeShop configuration, read from CLI arguments and `BEESHOP_*` variables.
#[derive(Debug, Args)]
pub struct BeeshopConfig {
    /// Cart persistence settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Shop behaviour settings.
    #[command(flatten)]
    pub shop: ShopConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl BeeshopConfig {
    /// Build the storefront settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is unknown or the timeout does not
    /// fit a duration.
    pub fn settings(&self) -> Result<ShopSettings, ConfigError> {
        let currency = Currency::find(&self.shop.currency.to_ascii_uppercase())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.shop.currency.clone()))?;

        let seconds = i64::try_from(self.shop.notification_timeout_secs)
            .map_err(|_err| ConfigError::InvalidTimeout(self.shop.notification_timeout_secs))?;

        Ok(ShopSettings {
            storage_key: self.storage.storage_key.clone(),
            currency,
            notification_timeout: SignedDuration::from_secs(seconds),
            notification_limit: self.shop.notification_limit,
            validate_contact: self.shop.validate_contact,
            ..ShopSettings::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: BeeshopConfig,
    }

    #[test]
    fn defaults_match_shop_settings() -> TestResult {
        let cli = TestCli::try_parse_from(["beeshop"])?;
        let settings = cli.config.settings()?;
        let defaults = ShopSettings::default();

        assert_eq!(settings.storage_key, defaults.storage_key);
        assert_eq!(settings.currency, defaults.currency);
        assert_eq!(settings.notification_timeout, defaults.notification_timeout);
        assert_eq!(settings.notification_limit, defaults.notification_limit);
        assert!(settings.validate_contact);

        Ok(())
    }

    #[test]
    fn overrides_are_applied() -> TestResult {
        let cli = TestCli::try_parse_from([
            "beeshop",
            "--currency",
            "eur",
            "--storage-key",
            "bee-cart",
            "--notification-timeout-secs",
            "2",
            "--validate-contact",
            "false",
        ])?;
        let settings = cli.config.settings()?;

        assert_eq!(settings.currency, iso::EUR);
        assert_eq!(settings.storage_key, "bee-cart");
        assert_eq!(settings.notification_timeout, SignedDuration::from_secs(2));
        assert!(!settings.validate_contact);

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() -> TestResult {
        let cli = TestCli::try_parse_from(["beeshop", "--currency", "XYZ"])?;

        assert!(matches!(
            cli.config.settings(),
            Err(ConfigError::UnknownCurrency(code)) if code == "XYZ"
        ));

        Ok(())
    }
}
