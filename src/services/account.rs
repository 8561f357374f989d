//! Account service
//!
//! Listing plus derived balances. Accounts are seeded directly through the
//! store; this service only reads them.

use super::Ledger;
use crate::error::DericerResult;
use crate::models::{Account, AccountId, CurrencyCode};
use crate::reports::{compute_account_balances, currency_totals, visible_currency_totals, AccountBalance, SumByGroup};

/// Service for account queries
pub struct AccountService<'a> {
    ledger: &'a Ledger,
}

impl<'a> AccountService<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Accounts that are not soft-deleted, archived ones included
    pub fn list_active(&self) -> DericerResult<Vec<Account>> {
        let mut accounts = self.ledger.store().load_all_accounts()?;
        accounts.retain(|a| !a.is_deleted);
        Ok(accounts)
    }

    /// A live account, or `None` when it is missing or soft-deleted
    pub fn get(&self, id: AccountId) -> DericerResult<Option<Account>> {
        Ok(self
            .ledger
            .store()
            .get_account_by_id(id)?
            .filter(|a| !a.is_deleted))
    }

    /// Current balance of every stored account
    pub fn balances(&self) -> DericerResult<Vec<AccountBalance>> {
        let store = self.ledger.store();
        let accounts = store.load_all_accounts()?;
        let transactions = store.load_all_transactions()?;
        Ok(compute_account_balances(&accounts, &transactions))
    }

    /// Balances summed per currency
    pub fn currency_totals(&self) -> DericerResult<Vec<SumByGroup<CurrencyCode>>> {
        Ok(currency_totals(&self.balances()?))
    }

    /// Currency totals with effectively-zero currencies removed
    pub fn visible_currency_totals(&self) -> DericerResult<Vec<SumByGroup<CurrencyCode>>> {
        let totals = self.currency_totals()?;
        let configs = self.ledger.store().load_currency_configs()?;
        visible_currency_totals(totals, &configs)
    }
}
