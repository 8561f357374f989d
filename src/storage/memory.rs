//! In-memory store
//!
//! Keeps every collection in a `RwLock<Vec<_>>`. Useful when the ledger is
//! embedded without a data directory, and in tests.

use std::sync::RwLock;

use super::LedgerStore;
use crate::error::{DericerError, DericerResult};
use crate::models::{upsert_by_id, Account, Budget, Category, CurrencyConfig, Goal, Record, Transaction};

#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<Vec<Account>>,
    transactions: RwLock<Vec<Transaction>>,
    categories: RwLock<Vec<Category>>,
    budgets: RwLock<Vec<Budget>>,
    goals: RwLock<Vec<Goal>>,
    currency_configs: RwLock<Vec<CurrencyConfig>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn snapshot<T: Clone>(lock: &RwLock<Vec<T>>) -> DericerResult<Vec<T>> {
    let data = lock
        .read()
        .map_err(|e| DericerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
    Ok(data.clone())
}

fn upsert<T: Record>(lock: &RwLock<Vec<T>>, records: &[T]) -> DericerResult<()> {
    let mut data = lock
        .write()
        .map_err(|e| DericerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
    for record in records {
        upsert_by_id(&mut data, record.clone());
    }
    Ok(())
}

impl LedgerStore for MemoryStore {
    fn load_all_accounts(&self) -> DericerResult<Vec<Account>> {
        snapshot(&self.accounts)
    }

    fn save_account(&self, account: &Account) -> DericerResult<()> {
        upsert(&self.accounts, std::slice::from_ref(account))
    }

    fn load_all_transactions(&self) -> DericerResult<Vec<Transaction>> {
        snapshot(&self.transactions)
    }

    fn save_transaction(&self, transaction: &Transaction) -> DericerResult<()> {
        upsert(&self.transactions, std::slice::from_ref(transaction))
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> DericerResult<()> {
        upsert(&self.transactions, transactions)
    }

    fn load_all_categories(&self) -> DericerResult<Vec<Category>> {
        snapshot(&self.categories)
    }

    fn save_category(&self, category: &Category) -> DericerResult<()> {
        upsert(&self.categories, std::slice::from_ref(category))
    }

    fn load_all_budgets(&self) -> DericerResult<Vec<Budget>> {
        snapshot(&self.budgets)
    }

    fn save_budget(&self, budget: &Budget) -> DericerResult<()> {
        upsert(&self.budgets, std::slice::from_ref(budget))
    }

    fn load_all_goals(&self) -> DericerResult<Vec<Goal>> {
        snapshot(&self.goals)
    }

    fn save_goal(&self, goal: &Goal) -> DericerResult<()> {
        upsert(&self.goals, std::slice::from_ref(goal))
    }

    fn load_currency_configs(&self) -> DericerResult<Vec<CurrencyConfig>> {
        snapshot(&self.currency_configs)
    }

    fn save_currency_configs(&self, configs: &[CurrencyConfig]) -> DericerResult<()> {
        let mut data = self
            .currency_configs
            .write()
            .map_err(|e| DericerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = configs.to_vec();
        Ok(())
    }
}
