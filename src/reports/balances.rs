//! Account balances and per-currency totals

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::sums::{GroupTotals, SumByGroup};
use crate::error::DericerResult;
use crate::models::money::find_currency_config;
use crate::models::{Account, AccountId, CurrencyCode, CurrencyConfig, Transaction};

/// Current balance of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_id: AccountId,
    pub currency: CurrencyCode,
    pub balance_minor: i64,
}

/// Initial balance plus the signed sum of each account's live transactions
///
/// Every account in `accounts` gets a row, in input order.
pub fn compute_account_balances(accounts: &[Account], transactions: &[Transaction]) -> Vec<AccountBalance> {
    let mut movement: HashMap<AccountId, i64> = HashMap::new();
    for txn in transactions.iter().filter(|t| !t.is_deleted) {
        *movement.entry(txn.account_id).or_insert(0) += txn.signed_amount_minor();
    }

    accounts
        .iter()
        .map(|account| AccountBalance {
            account_id: account.id,
            currency: account.currency.clone(),
            balance_minor: account.initial_balance_minor
                + movement.get(&account.id).copied().unwrap_or(0),
        })
        .collect()
}

/// Balances summed per currency code
pub fn currency_totals(balances: &[AccountBalance]) -> Vec<SumByGroup<CurrencyCode>> {
    let mut totals = GroupTotals::new();
    for balance in balances {
        totals.add(balance.currency.clone(), balance.balance_minor);
    }
    totals.into_vec()
}

/// Currency totals without the ones that round to zero for display
///
/// Fails with a validation error when a currency has no registered config.
pub fn visible_currency_totals(
    totals: Vec<SumByGroup<CurrencyCode>>,
    configs: &[CurrencyConfig],
) -> DericerResult<Vec<SumByGroup<CurrencyCode>>> {
    let mut visible = Vec::with_capacity(totals.len());
    for total in totals {
        let config = find_currency_config(configs, &total.key)?;
        if !config.is_effectively_zero(total.total_minor) {
            visible.push(total);
        }
    }
    Ok(visible)
}
