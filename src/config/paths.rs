//! Path management for Dericer
//!
//! ## Path Resolution Order
//!
//! 1. `DERICER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/dericer` on Linux, `~/Library/Application Support/dericer` on macOS,
//!    `%APPDATA%\dericer` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{DericerError, DericerResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "DERICER_DATA_DIR";

pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const BUDGETS_FILE: &str = "budgets.json";
pub const GOALS_FILE: &str = "goals.json";
pub const CURRENCY_CONFIGS_FILE: &str = "currency-configs.json";

/// Manages all paths used by Dericer
#[derive(Debug, Clone)]
pub struct DericerPaths {
    base_dir: PathBuf,
}

impl DericerPaths {
    /// Resolve the base directory from the environment or the platform default
    pub fn new() -> DericerResult<Self> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per collection
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join(ACCOUNTS_FILE)
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join(TRANSACTIONS_FILE)
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join(CATEGORIES_FILE)
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join(BUDGETS_FILE)
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join(GOALS_FILE)
    }

    pub fn currency_configs_file(&self) -> PathBuf {
        self.data_dir().join(CURRENCY_CONFIGS_FILE)
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> DericerResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DericerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DericerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> DericerResult<PathBuf> {
    ProjectDirs::from("", "", "dericer")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| DericerError::Config("Could not determine a home directory".into()))
}
