//! Grouped sums of signed amounts

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::models::{ancestor_ids, build_category_index, AccountId, Category, CategoryId, CurrencyCode, Transaction};

/// Total for one group key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SumByGroup<K> {
    pub key: K,
    pub total_minor: i64,
}

/// Accumulates totals per key, keeping keys in first-seen order
pub(crate) struct GroupTotals<K> {
    groups: Vec<SumByGroup<K>>,
    index: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> GroupTotals<K> {
    pub(crate) fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K, amount: i64) {
        match self.index.get(&key) {
            Some(&position) => self.groups[position].total_minor += amount,
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(SumByGroup {
                    key,
                    total_minor: amount,
                });
            }
        }
    }

    pub(crate) fn into_vec(self) -> Vec<SumByGroup<K>> {
        self.groups
    }
}

fn sum_by<'a, K, I, F>(transactions: I, key: F) -> Vec<SumByGroup<K>>
where
    K: Clone + Eq + Hash,
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(&Transaction) -> K,
{
    let mut totals = GroupTotals::new();
    for txn in transactions.into_iter().filter(|t| !t.is_deleted) {
        totals.add(key(txn), txn.signed_amount_minor());
    }
    totals.into_vec()
}

/// Signed totals per account, skipping deleted transactions
pub fn sum_by_account<'a, I>(transactions: I) -> Vec<SumByGroup<AccountId>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    sum_by(transactions, |t| t.account_id)
}

/// Signed totals per currency code, skipping deleted transactions
pub fn sum_by_currency<'a, I>(transactions: I) -> Vec<SumByGroup<CurrencyCode>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    sum_by(transactions, |t| t.currency.clone())
}

/// Signed totals per category, rolled up into every ancestor
///
/// A transaction counts toward its own category and each category above it,
/// so a parent's total covers its whole subtree. Uncategorized and deleted
/// transactions are left out.
pub fn sum_by_category_hierarchy<'a, I>(
    transactions: I,
    categories: &[Category],
) -> Vec<SumByGroup<CategoryId>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let index = build_category_index(categories);
    let mut totals = GroupTotals::new();

    for txn in transactions.into_iter().filter(|t| !t.is_deleted) {
        let Some(category_id) = txn.category_id else {
            continue;
        };
        let signed = txn.signed_amount_minor();

        totals.add(category_id, signed);
        for ancestor in ancestor_ids(category_id, &index) {
            totals.add(ancestor, signed);
        }
    }

    totals.into_vec()
}
