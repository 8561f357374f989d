//! Budget service
//!
//! Loads budgets, transactions and categories and evaluates spend.

use super::Ledger;
use crate::error::{DericerError, DericerResult};
use crate::models::{Budget, BudgetId};
use crate::reports::{calculate_budget_status, summarize_budget_statuses, BudgetStatus, SumByGroup};

/// Service for budget evaluation
pub struct BudgetService<'a> {
    ledger: &'a Ledger,
}

impl<'a> BudgetService<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Budgets that are not soft-deleted
    pub fn list_active(&self) -> DericerResult<Vec<Budget>> {
        let mut budgets = self.ledger.store().load_all_budgets()?;
        budgets.retain(|b| !b.is_deleted);
        Ok(budgets)
    }

    /// Status of every live budget
    pub fn evaluate_all(&self) -> DericerResult<Vec<BudgetStatus>> {
        let store = self.ledger.store();
        let budgets = self.list_active()?;
        let transactions = store.load_all_transactions()?;
        let categories = store.load_all_categories()?;

        Ok(budgets
            .iter()
            .map(|budget| calculate_budget_status(budget, &transactions, &categories))
            .collect())
    }

    /// Status of one live budget
    pub fn evaluate(&self, id: BudgetId) -> DericerResult<BudgetStatus> {
        let store = self.ledger.store();
        let budget = store
            .get_budget_by_id(id)?
            .filter(|b| !b.is_deleted)
            .ok_or_else(|| DericerError::budget_not_found(id.to_string()))?;

        let transactions = store.load_all_transactions()?;
        let categories = store.load_all_categories()?;
        Ok(calculate_budget_status(&budget, &transactions, &categories))
    }

    /// Spent amount per live budget
    pub fn spent_summary(&self) -> DericerResult<Vec<SumByGroup<BudgetId>>> {
        Ok(summarize_budget_statuses(&self.evaluate_all()?))
    }
}
