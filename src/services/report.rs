//! Report service
//!
//! Loads the transaction snapshot once per call and feeds the filtered set
//! to the pure aggregations in `reports`.

use super::transaction::{TransactionQuery, TransactionService};
use super::Ledger;
use crate::error::DericerResult;
use crate::models::{AccountId, CategoryId, CurrencyCode};
use crate::reports::{
    filter_transactions, sort_transactions, sum_by_account, sum_by_category_hierarchy,
    sum_by_currency, total_signed_amount, SumByGroup, TransactionFilter, TransactionSort,
};

/// Listing and category roll-up computed from one filtered set
#[derive(Debug, Clone)]
pub struct CategoryQueryReport {
    pub query: TransactionQuery,
    pub by_category: Vec<SumByGroup<CategoryId>>,
}

/// Service for aggregated reports
pub struct ReportService<'a> {
    ledger: &'a Ledger,
}

impl<'a> ReportService<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn query_transactions(
        &self,
        filter: Option<&TransactionFilter>,
        sort: Option<&TransactionSort>,
    ) -> DericerResult<TransactionQuery> {
        TransactionService::new(self.ledger).query(filter, sort)
    }

    pub fn sum_by_account(&self, filter: Option<&TransactionFilter>) -> DericerResult<Vec<SumByGroup<AccountId>>> {
        let all = self.ledger.store().load_all_transactions()?;
        Ok(sum_by_account(filter_transactions(&all, filter)))
    }

    /// Category sums with every ancestor credited
    pub fn sum_by_category(&self, filter: Option<&TransactionFilter>) -> DericerResult<Vec<SumByGroup<CategoryId>>> {
        let store = self.ledger.store();
        let all = store.load_all_transactions()?;
        let categories = store.load_all_categories()?;
        Ok(sum_by_category_hierarchy(filter_transactions(&all, filter), &categories))
    }

    pub fn sum_by_currency(&self, filter: Option<&TransactionFilter>) -> DericerResult<Vec<SumByGroup<CurrencyCode>>> {
        let all = self.ledger.store().load_all_transactions()?;
        Ok(sum_by_currency(filter_transactions(&all, filter)))
    }

    /// Filtered listing, its total and its category roll-up in one pass
    pub fn query_and_sum_by_category(
        &self,
        filter: Option<&TransactionFilter>,
        sort: Option<&TransactionSort>,
    ) -> DericerResult<CategoryQueryReport> {
        let store = self.ledger.store();
        let all = store.load_all_transactions()?;
        let categories = store.load_all_categories()?;

        let filtered = filter_transactions(&all, filter);
        let by_category = sum_by_category_hierarchy(filtered.iter().copied(), &categories);
        let total_amount_minor = total_signed_amount(filtered.iter().copied());
        let total_count = filtered.len();
        let transactions = sort_transactions(filtered, sort).into_iter().cloned().collect();

        Ok(CategoryQueryReport {
            query: TransactionQuery {
                transactions,
                total_count,
                total_amount_minor,
            },
            by_category,
        })
    }
}
