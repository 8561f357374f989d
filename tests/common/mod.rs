//! Shared test utilities for integration tests.
//!
//! `TestLedger` wires a `Core` to a `JsonFileStore` in a temporary directory
//! with a `FixedClock` and an audit log, and offers seeding helpers for the
//! records the facade does not create itself.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use dericer::audit::AuditLogger;
use dericer::models::{
    Account, AccountId, Budget, Category, CategoryId, CurrencyConfig, TransactionKind,
};
use dericer::services::CreateTransactionInput;
use dericer::storage::{JsonFileStore, LedgerStore};
use dericer::api::TransactionDto;
use dericer::{Core, FixedClock};
use tempfile::TempDir;

pub struct TestLedger {
    pub temp_dir: TempDir,
    pub store: Arc<JsonFileStore>,
    pub clock: Arc<FixedClock>,
    pub core: Core,
}

impl TestLedger {
    /// Fresh ledger with USD and EUR registered
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(JsonFileStore::new(temp_dir.path().join("data")));
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
        ));
        let core = Core::new(store.clone(), clock.clone())
            .with_audit(AuditLogger::new(temp_dir.path().join("audit.log")));

        let ledger = Self {
            temp_dir,
            store,
            clock,
            core,
        };
        ledger.register_currency("USD", 0);
        ledger.register_currency("EUR", 0);
        ledger
    }

    pub fn register_currency(&self, code: &str, zero_minor_value: i64) {
        let config = CurrencyConfig::new(code, Some(2), Some(zero_minor_value))
            .expect("Invalid currency config");
        self.core
            .currencies()
            .register(config)
            .expect("Failed to register currency");
    }

    pub fn seed_account(&self, name: &str, currency: &str, initial_balance_minor: i64) -> AccountId {
        let account = Account::new(name, currency, initial_balance_minor, Utc::now());
        self.store.save_account(&account).expect("Failed to save account");
        account.id
    }

    pub fn seed_category(&self, name: &str, parent: Option<CategoryId>) -> CategoryId {
        let category = match parent {
            Some(parent_id) => Category::with_parent(name, parent_id),
            None => Category::new(name),
        };
        self.store.save_category(&category).expect("Failed to save category");
        category.id
    }

    pub fn seed_budget(&self, budget: Budget) -> Budget {
        self.store.save_budget(&budget).expect("Failed to save budget");
        budget
    }

    /// Record a transaction through the facade
    pub fn record(
        &self,
        account_id: AccountId,
        kind: TransactionKind,
        amount_minor: i64,
        currency: &str,
        date: NaiveDate,
        category_id: Option<CategoryId>,
    ) -> TransactionDto {
        let mut input = CreateTransactionInput::new(account_id, kind, amount_minor, currency, date);
        input.category_id = category_id;
        self.core
            .transactions()
            .create(input)
            .expect("Failed to create transaction")
    }

    pub fn audit(&self) -> &AuditLogger {
        self.core
            .ledger()
            .audit_logger()
            .expect("Audit logger not attached")
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Invalid date")
}
