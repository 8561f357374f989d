//! Currency config service
//!
//! The store keeps currency configs as one collection; registering a config
//! rewrites it with the entry for that currency replaced or appended.

use super::Ledger;
use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::DericerResult;
use crate::models::money::find_currency_config;
use crate::models::CurrencyConfig;

pub struct CurrencyService<'a> {
    ledger: &'a Ledger,
}

impl<'a> CurrencyService<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn list(&self) -> DericerResult<Vec<CurrencyConfig>> {
        self.ledger.store().load_currency_configs()
    }

    /// Config for `currency`, or a validation error when none is registered
    pub fn get(&self, currency: &str) -> DericerResult<CurrencyConfig> {
        let configs = self.list()?;
        find_currency_config(&configs, currency).cloned()
    }

    /// Add or replace the config for `config.currency`
    pub fn register(&self, config: CurrencyConfig) -> DericerResult<CurrencyConfig> {
        config.validate()?;

        let mut configs = self.list()?;
        let before = configs.iter().position(|c| c.currency == config.currency);
        let previous = match before {
            Some(index) => Some(std::mem::replace(&mut configs[index], config.clone())),
            None => {
                configs.push(config.clone());
                None
            }
        };
        self.ledger.store().save_currency_configs(&configs)?;

        match previous {
            Some(previous) => self.ledger.log_update(
                EntityType::CurrencyConfig,
                config.currency.clone(),
                None,
                &previous,
                &config,
            ),
            None => self.ledger.log_create(
                EntityType::CurrencyConfig,
                config.currency.clone(),
                None,
                &config,
            ),
        }

        Ok(config)
    }

    /// Register the default currency from `settings` unless it is already known
    pub fn ensure_default(&self, settings: &Settings) -> DericerResult<()> {
        let configs = self.list()?;
        if configs.iter().any(|c| c.currency == settings.default_currency) {
            return Ok(());
        }

        tracing::info!(currency = %settings.default_currency, "registering default currency");
        self.register(settings.default_currency_config()?)?;
        Ok(())
    }
}
