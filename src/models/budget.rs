//! Budget model
//!
//! A budget caps expense spending for one category subtree, in one currency,
//! over an inclusive date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::CurrencyCode;

/// A spending budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Root of the category scope; descendants are included
    pub category_id: CategoryId,

    /// Only transactions in this currency count
    pub currency: CurrencyCode,

    /// Budgeted amount in minor units
    pub amount_minor: i64,

    /// First day of the budget (inclusive)
    pub start_date: NaiveDate,

    /// Last day of the budget (inclusive)
    pub end_date: NaiveDate,

    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Soft-delete marker
    #[serde(default)]
    pub is_deleted: bool,
}

impl Budget {
    /// Create a new budget
    pub fn new(
        category_id: CategoryId,
        currency: impl Into<CurrencyCode>,
        amount_minor: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: BudgetId::new(),
            category_id,
            currency: currency.into(),
            amount_minor,
            start_date,
            end_date,
            name: None,
            is_deleted: false,
        }
    }

    /// Set the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check if `date` falls inside the budget range (both ends inclusive)
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{} {}..{}", self.id, self.start_date, self.end_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_date_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let budget = Budget::new(CategoryId::new(), "USD", 10000, start, end);

        assert!(budget.contains_date(start));
        assert!(budget.contains_date(end));
        assert!(!budget.contains_date(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
        assert!(!budget.contains_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
    }
}
