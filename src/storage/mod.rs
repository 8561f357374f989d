//! Storage layer for Dericer
//!
//! The ledger core talks to persistence only through [`LedgerStore`]: snapshot
//! reads of whole collections, per-record upserts and lookups by id. Two
//! implementations ship with the crate:
//!
//! - [`JsonFileStore`]: one JSON array file per collection, rewritten
//!   atomically on every save
//! - [`MemoryStore`]: in-process collections, for embedding and tests
//!
//! Nothing above this layer caches records between calls; every operation
//! re-reads what it needs.

pub mod file_io;
pub mod json_store;
pub mod memory;

pub use file_io::{read_json, write_json_atomic};
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::DericerResult;
use crate::models::{
    find_by_id, Account, AccountId, Budget, BudgetId, Category, CategoryId, CurrencyConfig, Goal,
    GoalId, Transaction, TransactionId,
};

/// Repository contract consumed by the services
///
/// Each method is atomic on its own; nothing is coordinated across calls.
/// The `get_*_by_id` methods have snapshot-scan defaults that an indexed
/// store can override.
pub trait LedgerStore: Send + Sync {
    fn load_all_accounts(&self) -> DericerResult<Vec<Account>>;
    fn save_account(&self, account: &Account) -> DericerResult<()>;

    fn load_all_transactions(&self) -> DericerResult<Vec<Transaction>>;
    fn save_transaction(&self, transaction: &Transaction) -> DericerResult<()>;

    /// Upsert several transactions as one write: either all persist or none do
    fn save_transactions(&self, transactions: &[Transaction]) -> DericerResult<()>;

    fn load_all_categories(&self) -> DericerResult<Vec<Category>>;
    fn save_category(&self, category: &Category) -> DericerResult<()>;

    fn load_all_budgets(&self) -> DericerResult<Vec<Budget>>;
    fn save_budget(&self, budget: &Budget) -> DericerResult<()>;

    fn load_all_goals(&self) -> DericerResult<Vec<Goal>>;
    fn save_goal(&self, goal: &Goal) -> DericerResult<()>;

    fn load_currency_configs(&self) -> DericerResult<Vec<CurrencyConfig>>;

    /// Replace the whole currency config collection
    fn save_currency_configs(&self, configs: &[CurrencyConfig]) -> DericerResult<()>;

    fn get_account_by_id(&self, id: AccountId) -> DericerResult<Option<Account>> {
        Ok(find_by_id(&self.load_all_accounts()?, id).cloned())
    }

    fn get_transaction_by_id(&self, id: TransactionId) -> DericerResult<Option<Transaction>> {
        Ok(find_by_id(&self.load_all_transactions()?, id).cloned())
    }

    fn get_category_by_id(&self, id: CategoryId) -> DericerResult<Option<Category>> {
        Ok(find_by_id(&self.load_all_categories()?, id).cloned())
    }

    fn get_budget_by_id(&self, id: BudgetId) -> DericerResult<Option<Budget>> {
        Ok(find_by_id(&self.load_all_budgets()?, id).cloned())
    }

    fn get_goal_by_id(&self, id: GoalId) -> DericerResult<Option<Goal>> {
        Ok(find_by_id(&self.load_all_goals()?, id).cloned())
    }
}
