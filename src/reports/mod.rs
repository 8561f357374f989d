//! Reporting and aggregation for Dericer
//!
//! Everything here is a pure function over record snapshots; the services
//! load the snapshots and call in.
//!
//! - Transaction filtering, sorting and totals
//! - Sums grouped by account, currency or category (with roll-up)
//! - Account balances and visible currency totals
//! - Budget evaluation

pub mod balances;
pub mod budget_status;
pub mod query;
pub mod sums;

pub use balances::{compute_account_balances, currency_totals, visible_currency_totals, AccountBalance};
pub use budget_status::{calculate_budget_status, summarize_budget_statuses, BudgetStatus};
pub use query::{
    filter_transactions, sort_transactions, total_signed_amount, SortDirection, SortField,
    TransactionFilter, TransactionSort,
};
pub use sums::{sum_by_account, sum_by_category_hierarchy, sum_by_currency, SumByGroup};
