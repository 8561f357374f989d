//! Budget evaluation
//!
//! Spend is the absolute sum of live expense transactions that match the
//! budget's currency, fall inside its inclusive date range and carry a
//! category in the budget's scope (its category plus all descendants).
//! Income, debt and receivable transactions never count.

use serde::{Deserialize, Serialize};

use super::sums::SumByGroup;
use crate::models::{category_scope, Budget, BudgetId, Category, Transaction, TransactionKind};

/// Spend against one budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent_minor: i64,
    /// Negative when over budget
    pub remaining_minor: i64,
    /// Always within 0..=100
    pub percent_used: f64,
}

impl BudgetStatus {
    pub fn is_over_budget(&self) -> bool {
        self.remaining_minor < 0
    }
}

pub fn calculate_budget_status(
    budget: &Budget,
    transactions: &[Transaction],
    categories: &[Category],
) -> BudgetStatus {
    let scope = category_scope(budget.category_id, categories);

    let spent_minor: i64 = transactions
        .iter()
        .filter(|t| !t.is_deleted)
        .filter(|t| t.currency == budget.currency)
        .filter(|t| budget.contains_date(t.date))
        .filter(|t| t.kind == TransactionKind::Expense)
        .filter(|t| t.category_id.is_some_and(|id| scope.contains(&id)))
        .map(|t| t.signed_amount_minor().abs())
        .sum();

    let percent_used = if budget.amount_minor == 0 {
        if spent_minor > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        (spent_minor as f64 / budget.amount_minor as f64 * 100.0).clamp(0.0, 100.0)
    };

    BudgetStatus {
        budget: budget.clone(),
        spent_minor,
        remaining_minor: budget.amount_minor - spent_minor,
        percent_used,
    }
}

/// Spent amount keyed by budget id
pub fn summarize_budget_statuses(statuses: &[BudgetStatus]) -> Vec<SumByGroup<BudgetId>> {
    statuses
        .iter()
        .map(|status| SumByGroup {
            key: status.budget.id,
            total_minor: status.spent_minor,
        })
        .collect()
}
