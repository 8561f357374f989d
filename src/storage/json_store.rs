//! JSON file store
//!
//! Each collection is a pretty-printed JSON array in the data directory.
//! A save reads the current file, upserts by id and rewrites the file
//! atomically. Saves from one process are serialized by a lock so two
//! threads cannot interleave a read-modify-write on the same store; separate
//! processes are not coordinated.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};

use super::file_io::{read_json, write_json_atomic};
use super::LedgerStore;
use crate::config::paths::{
    DericerPaths, ACCOUNTS_FILE, BUDGETS_FILE, CATEGORIES_FILE, CURRENCY_CONFIGS_FILE, GOALS_FILE,
    TRANSACTIONS_FILE,
};
use crate::error::{DericerError, DericerResult};
use crate::models::{upsert_by_id, Account, Budget, Category, CurrencyConfig, Goal, Record, Transaction};

/// Store backed by one JSON file per collection
pub struct JsonFileStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store rooted at `data_dir`; files are created on first save
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store in the data directory of `paths`
    pub fn from_paths(paths: &DericerPaths) -> DericerResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(paths.data_dir()))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> DericerResult<Vec<T>> {
        read_json(self.data_dir.join(file))
    }

    fn upsert_all<T>(&self, file: &str, records: &[T]) -> DericerResult<()>
    where
        T: Record + Serialize + DeserializeOwned,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| DericerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut all: Vec<T> = self.load(file)?;
        for record in records {
            upsert_by_id(&mut all, record.clone());
        }
        write_json_atomic(self.data_dir.join(file), &all)
    }
}

impl LedgerStore for JsonFileStore {
    fn load_all_accounts(&self) -> DericerResult<Vec<Account>> {
        self.load(ACCOUNTS_FILE)
    }

    fn save_account(&self, account: &Account) -> DericerResult<()> {
        self.upsert_all(ACCOUNTS_FILE, std::slice::from_ref(account))
    }

    fn load_all_transactions(&self) -> DericerResult<Vec<Transaction>> {
        self.load(TRANSACTIONS_FILE)
    }

    fn save_transaction(&self, transaction: &Transaction) -> DericerResult<()> {
        self.upsert_all(TRANSACTIONS_FILE, std::slice::from_ref(transaction))
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> DericerResult<()> {
        self.upsert_all(TRANSACTIONS_FILE, transactions)
    }

    fn load_all_categories(&self) -> DericerResult<Vec<Category>> {
        self.load(CATEGORIES_FILE)
    }

    fn save_category(&self, category: &Category) -> DericerResult<()> {
        self.upsert_all(CATEGORIES_FILE, std::slice::from_ref(category))
    }

    fn load_all_budgets(&self) -> DericerResult<Vec<Budget>> {
        self.load(BUDGETS_FILE)
    }

    fn save_budget(&self, budget: &Budget) -> DericerResult<()> {
        self.upsert_all(BUDGETS_FILE, std::slice::from_ref(budget))
    }

    fn load_all_goals(&self) -> DericerResult<Vec<Goal>> {
        self.load(GOALS_FILE)
    }

    fn save_goal(&self, goal: &Goal) -> DericerResult<()> {
        self.upsert_all(GOALS_FILE, std::slice::from_ref(goal))
    }

    fn load_currency_configs(&self) -> DericerResult<Vec<CurrencyConfig>> {
        self.load(CURRENCY_CONFIGS_FILE)
    }

    fn save_currency_configs(&self, configs: &[CurrencyConfig]) -> DericerResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| DericerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        write_json_atomic(self.data_dir.join(CURRENCY_CONFIGS_FILE), configs)
    }
}
