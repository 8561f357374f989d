//! User settings for Dericer
//!
//! Holds the default currency registered on first open and whether mutations
//! are written to the audit log.

use serde::{Deserialize, Serialize};

use super::paths::DericerPaths;
use crate::error::{DericerError, DericerResult};
use crate::models::money::{CurrencyCode, CurrencyConfig, MAX_DECIMALS};

/// User settings for Dericer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency registered when the ledger has no currency configs yet
    #[serde(default = "default_currency")]
    pub default_currency: CurrencyCode,

    /// Decimal precision of the default currency
    #[serde(default = "default_decimals")]
    pub default_decimals: u8,

    /// Zero threshold (minor units) of the default currency
    #[serde(default)]
    pub default_zero_minor_value: i64,

    /// Whether create/update/delete operations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> CurrencyCode {
    "USD".to_string()
}

fn default_decimals() -> u8 {
    2
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: default_currency(),
            default_decimals: default_decimals(),
            default_zero_minor_value: 0,
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults on first use
    pub fn load_or_create(paths: &DericerPaths) -> DericerResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            let settings = Settings::default();
            settings.save(paths)?;
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| DericerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| DericerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DericerPaths) -> DericerResult<()> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DericerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DericerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings that could not produce a valid currency config
    pub fn validate(&self) -> DericerResult<()> {
        if self.default_decimals > MAX_DECIMALS {
            return Err(DericerError::Config(format!(
                "default_decimals must be between 0 and {}",
                MAX_DECIMALS
            )));
        }
        if self.default_currency.trim().is_empty() {
            return Err(DericerError::Config(
                "default_currency cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Currency config for the default currency
    pub fn default_currency_config(&self) -> DericerResult<CurrencyConfig> {
        CurrencyConfig::new(
            self.default_currency.clone(),
            Some(self.default_decimals),
            Some(self.default_zero_minor_value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_currency, "USD");
        assert_eq!(settings.default_decimals, 2);
        assert!(settings.audit_enabled);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DericerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_currency: "EUR".into(),
            audit_enabled: false,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_currency, "EUR");
        assert!(!loaded.audit_enabled);
    }

    #[test]
    fn test_load_or_create_writes_defaults_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DericerPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(!paths.is_initialized());

        let created = Settings::load_or_create(&paths).unwrap();
        assert!(paths.is_initialized());
        assert_eq!(created.default_currency, "USD");

        Settings {
            default_currency: "EUR".into(),
            ..created
        }
        .save(&paths)
        .unwrap();
        assert_eq!(Settings::load_or_create(&paths).unwrap().default_currency, "EUR");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_currency":"IRR"}"#).unwrap();
        assert_eq!(settings.default_currency, "IRR");
        assert_eq!(settings.default_decimals, 2);
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_invalid_decimals_rejected() {
        let settings = Settings {
            default_decimals: 9,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(DericerError::Config(_))));
    }
}
