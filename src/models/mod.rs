//! Core data models for Dericer
//!
//! This module contains the data structures of the ledger domain: accounts,
//! transactions, categories, budgets, savings goals and currency settings.

pub mod account;
pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod patch;
pub mod transaction;

pub use account::Account;
pub use budget::Budget;
pub use category::{ancestor_ids, build_category_index, category_scope, descendant_ids, Category};
pub use goal::Goal;
pub use ids::{AccountId, BudgetId, CategoryId, GoalId, TransactionId, TransferGroupId};
pub use money::{CurrencyCode, CurrencyConfig, Money};
pub use patch::FieldPatch;
pub use transaction::{Transaction, TransactionKind};

use chrono::NaiveDate;

use crate::error::{DericerError, DericerResult};

/// Anything stored in a keyed collection
pub trait Record: Clone {
    type Id: Copy + Eq;

    fn record_id(&self) -> Self::Id;
}

macro_rules! impl_record {
    ($ty:ty, $id:ty) => {
        impl Record for $ty {
            type Id = $id;

            fn record_id(&self) -> Self::Id {
                self.id
            }
        }
    };
}

impl_record!(Account, AccountId);
impl_record!(Transaction, TransactionId);
impl_record!(Category, CategoryId);
impl_record!(Budget, BudgetId);
impl_record!(Goal, GoalId);

/// Replace the record with the same id, or append it
pub fn upsert_by_id<T: Record>(items: &mut Vec<T>, record: T) {
    let id = record.record_id();
    match items.iter_mut().find(|item| item.record_id() == id) {
        Some(existing) => *existing = record,
        None => items.push(record),
    }
}

/// Find a record by id
pub fn find_by_id<T: Record>(items: &[T], id: T::Id) -> Option<&T> {
    items.iter().find(|item| item.record_id() == id)
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> DericerResult<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DericerError::Validation("Date is required".into()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| DericerError::Validation(format!("Invalid date: \"{}\"", value)))
}
