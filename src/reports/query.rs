//! Transaction filtering and sorting
//!
//! Pure functions over borrowed transactions. Every query drops soft-deleted
//! transactions first; an empty list or blank string in the filter imposes
//! no constraint.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AccountId, CategoryId, Transaction, TransactionKind};

/// Conditions a transaction must meet, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionFilter {
    pub account_ids: Vec<AccountId>,
    /// Exact category match; descendants are not included
    pub category_ids: Vec<CategoryId>,
    pub kinds: Vec<TransactionKind>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Lower bound on the signed amount (inclusive)
    pub min_amount_minor: Option<i64>,
    /// Upper bound on the signed amount (inclusive)
    pub max_amount_minor: Option<i64>,
    /// Every listed tag must be present
    pub tags: Vec<String>,
    pub counterparty_name_contains: Option<String>,
    /// Case-insensitive search over note, counterparty name and tags
    pub text_search: Option<String>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(mut self, ids: impl IntoIterator<Item = AccountId>) -> Self {
        self.account_ids = ids.into_iter().collect();
        self
    }

    pub fn categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    pub fn kinds(mut self, kinds: impl IntoIterator<Item = TransactionKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Inclusive date range; either end may be open
    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Inclusive signed-amount range; either end may be open
    pub fn amount_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_amount_minor = min;
        self.max_amount_minor = max;
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn counterparty_contains(mut self, needle: impl Into<String>) -> Self {
        self.counterparty_name_contains = Some(needle.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.text_search = Some(text.into());
        self
    }

    /// Check a non-deleted transaction against every condition
    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.account_ids.is_empty() && !self.account_ids.contains(&txn.account_id) {
            return false;
        }

        if !self.category_ids.is_empty() {
            match txn.category_id {
                Some(id) if self.category_ids.contains(&id) => {}
                _ => return false,
            }
        }

        if !self.kinds.is_empty() && !self.kinds.contains(&txn.kind) {
            return false;
        }

        if self.date_from.is_some_and(|from| txn.date < from)
            || self.date_to.is_some_and(|to| txn.date > to)
        {
            return false;
        }

        let signed = txn.signed_amount_minor();
        if self.min_amount_minor.is_some_and(|min| signed < min)
            || self.max_amount_minor.is_some_and(|max| signed > max)
        {
            return false;
        }

        if !txn.has_all_tags(&self.tags) {
            return false;
        }

        if let Some(needle) = non_blank(&self.counterparty_name_contains) {
            let hay = txn.counterparty_name.as_deref().unwrap_or_default();
            if !contains_ignore_case(hay, needle) {
                return false;
            }
        }

        if let Some(needle) = non_blank(&self.text_search) {
            let note = txn.note.as_deref().unwrap_or_default();
            let counterparty = txn.counterparty_name.as_deref().unwrap_or_default();
            let tags = txn.tags.join(" ");
            if !contains_ignore_case(note, needle)
                && !contains_ignore_case(counterparty, needle)
                && !contains_ignore_case(&tags, needle)
            {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Field a query can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Date,
    /// Signed amount
    AmountMinor,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl TransactionSort {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ordering = match self.field {
            SortField::Date => a.date.cmp(&b.date),
            SortField::AmountMinor => a.signed_amount_minor().cmp(&b.signed_amount_minor()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Non-deleted transactions that satisfy `filter`, in input order
pub fn filter_transactions<'a, I>(transactions: I, filter: Option<&TransactionFilter>) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|txn| !txn.is_deleted)
        .filter(|txn| filter.map_or(true, |f| f.matches(txn)))
        .collect()
}

/// Sorted copy of the input; without a sort, orders by date then creation time
///
/// The sort is stable, so equal keys keep their input order.
pub fn sort_transactions<'a, I>(transactions: I, sort: Option<&TransactionSort>) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sorted: Vec<&Transaction> = transactions.into_iter().collect();
    match sort {
        Some(sort) => sorted.sort_by(|a, b| sort.compare(a, b)),
        None => sorted.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.created_at.cmp(&b.created_at))
        }),
    }
    sorted
}

/// Sum of signed amounts
pub fn total_signed_amount<'a, I>(transactions: I) -> i64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(Transaction::signed_amount_minor)
        .sum()
}
