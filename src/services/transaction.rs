//! Transaction service
//!
//! Creation, transfers, partial updates and soft deletes, plus filtered
//! queries over the current transaction snapshot.

use chrono::NaiveDate;

use super::Ledger;
use crate::audit::{AuditEntry, EntityType};
use crate::error::{DericerError, DericerResult};
use crate::models::{
    AccountId, CategoryId, CurrencyCode, FieldPatch, Transaction, TransactionId, TransactionKind,
    TransferGroupId,
};
use crate::reports::{filter_transactions, sort_transactions, total_signed_amount, TransactionFilter, TransactionSort};

/// Service for transaction management
pub struct TransactionService<'a> {
    ledger: &'a Ledger,
}

/// Input for creating a single transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub account_id: AccountId,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub currency: CurrencyCode,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub category_id: Option<CategoryId>,
    pub tags: Vec<String>,
    pub counterparty_name: Option<String>,
}

impl CreateTransactionInput {
    pub fn new(
        account_id: AccountId,
        kind: TransactionKind,
        amount_minor: i64,
        currency: impl Into<CurrencyCode>,
        date: NaiveDate,
    ) -> Self {
        Self {
            account_id,
            kind,
            amount_minor,
            currency: currency.into(),
            date,
            note: None,
            category_id: None,
            tags: Vec::new(),
            counterparty_name: None,
        }
    }
}

/// Input for moving money between two accounts
#[derive(Debug, Clone)]
pub struct CreateTransferInput {
    pub source_account_id: AccountId,
    pub target_account_id: AccountId,
    pub currency: CurrencyCode,
    pub amount_minor: i64,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub tags: Vec<String>,
    pub counterparty_name: Option<String>,
}

/// Partial update of a transaction
///
/// `None` leaves a field alone. `category_id` and `counterparty_name` can also
/// be cleared through [`FieldPatch::Clear`].
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub kind: Option<TransactionKind>,
    pub amount_minor: Option<i64>,
    pub currency: Option<CurrencyCode>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub category_id: FieldPatch<CategoryId>,
    pub tags: Option<Vec<String>>,
    pub counterparty_name: FieldPatch<String>,
}

/// Filtered, sorted view with its aggregate
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    pub total_amount_minor: i64,
}

fn validate(txn: &Transaction) -> DericerResult<()> {
    txn.validate()
        .map_err(|e| DericerError::Validation(e.to_string()))
}

fn audit_id(id: TransactionId) -> String {
    id.as_uuid().to_string()
}

impl<'a> TransactionService<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Create and persist one transaction
    pub fn create(&self, input: CreateTransactionInput) -> DericerResult<Transaction> {
        if input.amount_minor <= 0 {
            return Err(DericerError::Validation(
                "Transaction amount must be positive".into(),
            ));
        }

        let mut txn = Transaction::new(
            input.account_id,
            input.kind,
            input.amount_minor,
            input.currency,
            input.date,
            self.ledger.now(),
        );
        txn.note = input.note;
        txn.category_id = input.category_id;
        txn.tags = input.tags;
        txn.counterparty_name = input.counterparty_name;

        validate(&txn)?;
        self.ledger.store().save_transaction(&txn)?;

        tracing::debug!(transaction = %txn.id, kind = %txn.kind, amount = txn.amount_minor, "created transaction");
        self.ledger.log_create(
            EntityType::Transaction,
            audit_id(txn.id),
            Some(txn.to_string()),
            &txn,
        );

        Ok(txn)
    }

    /// Create both legs of a transfer: an expense on the source and an income on the target
    ///
    /// The legs share a transfer group id and timestamp and are written in a
    /// single store call, so either both persist or neither does.
    pub fn create_transfer(&self, input: CreateTransferInput) -> DericerResult<(Transaction, Transaction)> {
        if input.amount_minor <= 0 {
            return Err(DericerError::Validation(
                "Transfer amount must be positive".into(),
            ));
        }

        let now = self.ledger.now();
        let group_id = TransferGroupId::new();

        let leg = |account_id: AccountId, kind: TransactionKind| {
            let mut txn = Transaction::new(
                account_id,
                kind,
                input.amount_minor,
                input.currency.clone(),
                input.date,
                now,
            );
            txn.note = input.note.clone();
            txn.tags = input.tags.clone();
            txn.counterparty_name = input.counterparty_name.clone();
            txn.transfer_group_id = Some(group_id);
            txn
        };

        let debit = leg(input.source_account_id, TransactionKind::Expense);
        let credit = leg(input.target_account_id, TransactionKind::Income);
        validate(&debit)?;
        validate(&credit)?;

        self.ledger
            .store()
            .save_transactions(&[debit.clone(), credit.clone()])?;

        tracing::debug!(group = %group_id, amount = input.amount_minor, "created transfer");
        self.ledger.log_batch(&[
            AuditEntry::create(now, EntityType::Transaction, audit_id(debit.id), Some(debit.to_string()), &debit),
            AuditEntry::create(now, EntityType::Transaction, audit_id(credit.id), Some(credit.to_string()), &credit),
        ]);

        Ok((debit, credit))
    }

    /// Apply a partial update to a live transaction
    pub fn update(&self, id: TransactionId, changes: UpdateTransactionInput) -> DericerResult<Transaction> {
        let before = self
            .ledger
            .store()
            .get_transaction_by_id(id)?
            .filter(|t| !t.is_deleted)
            .ok_or_else(|| DericerError::transaction_not_found(id.to_string()))?;

        let mut txn = before.clone();
        if let Some(kind) = changes.kind {
            txn.kind = kind;
        }
        if let Some(amount) = changes.amount_minor {
            txn.amount_minor = amount;
        }
        if let Some(currency) = changes.currency {
            txn.currency = currency;
        }
        if let Some(date) = changes.date {
            txn.date = date;
        }
        if let Some(note) = changes.note {
            txn.note = Some(note);
        }
        if let Some(tags) = changes.tags {
            txn.tags = tags;
        }
        txn.category_id = changes.category_id.apply(txn.category_id);
        txn.counterparty_name = changes.counterparty_name.apply(txn.counterparty_name);
        txn.updated_at = self.ledger.now();

        validate(&txn)?;
        self.ledger.store().save_transaction(&txn)?;

        tracing::debug!(transaction = %txn.id, "updated transaction");
        self.ledger.log_update(
            EntityType::Transaction,
            audit_id(txn.id),
            Some(txn.to_string()),
            &before,
            &txn,
        );

        Ok(txn)
    }

    /// Mark a transaction deleted; missing or already deleted ids are a no-op
    pub fn soft_delete(&self, id: TransactionId) -> DericerResult<()> {
        let Some(existing) = self
            .ledger
            .store()
            .get_transaction_by_id(id)?
            .filter(|t| !t.is_deleted)
        else {
            tracing::debug!(transaction = %id, "soft delete skipped, nothing live to delete");
            return Ok(());
        };

        let mut txn = existing.clone();
        txn.is_deleted = true;
        txn.updated_at = self.ledger.now();
        self.ledger.store().save_transaction(&txn)?;

        tracing::debug!(transaction = %id, "soft-deleted transaction");
        self.ledger.log_delete(
            EntityType::Transaction,
            audit_id(id),
            Some(existing.to_string()),
            &existing,
        );

        Ok(())
    }

    /// Get a live transaction by id
    pub fn get(&self, id: TransactionId) -> DericerResult<Transaction> {
        self.ledger
            .store()
            .get_transaction_by_id(id)?
            .filter(|t| !t.is_deleted)
            .ok_or_else(|| DericerError::transaction_not_found(id.to_string()))
    }

    /// Filter, sort and total the current transactions
    ///
    /// The total is computed over the same filtered set that is returned.
    pub fn query(
        &self,
        filter: Option<&TransactionFilter>,
        sort: Option<&TransactionSort>,
    ) -> DericerResult<TransactionQuery> {
        let all = self.ledger.store().load_all_transactions()?;
        let filtered = filter_transactions(&all, filter);
        let total_amount_minor = total_signed_amount(filtered.iter().copied());
        let total_count = filtered.len();
        let transactions = sort_transactions(filtered, sort).into_iter().cloned().collect();

        Ok(TransactionQuery {
            transactions,
            total_count,
            total_amount_minor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLogger;
    use crate::clock::{Clock, FixedClock};
    use crate::storage::{LedgerStore, MemoryStore};
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn setup() -> (Arc<MemoryStore>, Arc<FixedClock>, Ledger) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        let ledger = Ledger::new(store.clone(), clock.clone());
        (store, clock, ledger)
    }

    #[test]
    fn test_create_stamps_and_persists() {
        let (store, clock, ledger) = setup();
        let service = TransactionService::new(&ledger);

        let mut input = CreateTransactionInput::new(AccountId::new(), TransactionKind::Expense, 1000, "IRR", date(10));
        input.note = Some("Coffee".into());
        input.tags = vec!["food".into()];
        let txn = service.create(input).unwrap();

        assert_eq!(txn.created_at, clock.now());
        assert_eq!(txn.updated_at, clock.now());
        assert!(!txn.is_deleted);
        assert_eq!(store.get_transaction_by_id(txn.id).unwrap(), Some(txn));
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        let (store, _clock, ledger) = setup();
        let service = TransactionService::new(&ledger);

        for amount in [0, -5] {
            let input = CreateTransactionInput::new(AccountId::new(), TransactionKind::Income, amount, "USD", date(1));
            assert!(service.create(input).unwrap_err().is_validation());
        }
        assert!(store.load_all_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_unsafe_amount() {
        let (_store, _clock, ledger) = setup();
        let input = CreateTransactionInput::new(
            AccountId::new(),
            TransactionKind::Income,
            crate::models::money::MAX_SAFE_INTEGER + 1,
            "USD",
            date(1),
        );
        assert!(TransactionService::new(&ledger).create(input).unwrap_err().is_validation());
    }

    #[test]
    fn test_transfer_creates_linked_legs() {
        let (store, _clock, ledger) = setup();
        let service = TransactionService::new(&ledger);
        let source = AccountId::new();
        let target = AccountId::new();

        let (debit, credit) = service
            .create_transfer(CreateTransferInput {
                source_account_id: source,
                target_account_id: target,
                currency: "USD".into(),
                amount_minor: 2500,
                date: date(3),
                note: Some("rent share".into()),
                tags: vec!["home".into()],
                counterparty_name: None,
            })
            .unwrap();

        assert_eq!(debit.account_id, source);
        assert_eq!(debit.kind, TransactionKind::Expense);
        assert_eq!(credit.account_id, target);
        assert_eq!(credit.kind, TransactionKind::Income);
        assert_ne!(debit.id, credit.id);
        assert!(debit.transfer_group_id.is_some());
        assert_eq!(debit.transfer_group_id, credit.transfer_group_id);
        assert_eq!(debit.created_at, credit.created_at);
        assert_eq!(debit.note, credit.note);
        assert_eq!(store.load_all_transactions().unwrap().len(), 2);
    }

    #[test]
    fn test_transfer_rejects_non_positive_amount() {
        let (store, _clock, ledger) = setup();
        let result = TransactionService::new(&ledger).create_transfer(CreateTransferInput {
            source_account_id: AccountId::new(),
            target_account_id: AccountId::new(),
            currency: "USD".into(),
            amount_minor: 0,
            date: date(3),
            note: None,
            tags: Vec::new(),
            counterparty_name: None,
        });
        assert!(result.unwrap_err().is_validation());
        assert!(store.load_all_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_update_patch_semantics() {
        let (_store, clock, ledger) = setup();
        let service = TransactionService::new(&ledger);
        let category = CategoryId::new();

        let mut input = CreateTransactionInput::new(AccountId::new(), TransactionKind::Expense, 500, "USD", date(1));
        input.category_id = Some(category);
        input.counterparty_name = Some("Cafe".into());
        let txn = service.create(input).unwrap();

        clock.advance(Duration::minutes(5));
        let kept = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    amount_minor: Some(750),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(kept.amount_minor, 750);
        assert_eq!(kept.category_id, Some(category));
        assert_eq!(kept.counterparty_name.as_deref(), Some("Cafe"));
        assert_eq!(kept.created_at, txn.created_at);
        assert!(kept.updated_at > txn.updated_at);

        let cleared = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    category_id: FieldPatch::Clear,
                    counterparty_name: FieldPatch::Clear,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(cleared.category_id, None);
        assert_eq!(cleared.counterparty_name, None);
        assert_eq!(cleared.amount_minor, 750);
    }

    #[test]
    fn test_update_revalidates() {
        let (store, _clock, ledger) = setup();
        let service = TransactionService::new(&ledger);
        let txn = service
            .create(CreateTransactionInput::new(AccountId::new(), TransactionKind::Income, 100, "USD", date(1)))
            .unwrap();

        let err = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    amount_minor: Some(0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get_transaction_by_id(txn.id).unwrap().unwrap().amount_minor, 100);
    }

    #[test]
    fn test_update_missing_or_deleted_is_not_found() {
        let (_store, _clock, ledger) = setup();
        let service = TransactionService::new(&ledger);

        let err = service
            .update(TransactionId::new(), UpdateTransactionInput::default())
            .unwrap_err();
        assert!(err.is_not_found());

        let txn = service
            .create(CreateTransactionInput::new(AccountId::new(), TransactionKind::Income, 100, "USD", date(1)))
            .unwrap();
        service.soft_delete(txn.id).unwrap();
        let err = service.update(txn.id, UpdateTransactionInput::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_soft_delete_is_idempotent() {
        let (store, clock, ledger) = setup();
        let service = TransactionService::new(&ledger);
        let txn = service
            .create(CreateTransactionInput::new(AccountId::new(), TransactionKind::Income, 100, "USD", date(1)))
            .unwrap();

        clock.advance(Duration::minutes(1));
        service.soft_delete(txn.id).unwrap();
        let once = store.get_transaction_by_id(txn.id).unwrap().unwrap();
        assert!(once.is_deleted);

        clock.advance(Duration::minutes(1));
        service.soft_delete(txn.id).unwrap();
        service.soft_delete(TransactionId::new()).unwrap();
        assert_eq!(store.get_transaction_by_id(txn.id).unwrap().unwrap(), once);
        assert_eq!(store.load_all_transactions().unwrap().len(), 1);
    }

    #[test]
    fn test_query_totals_follow_filter() {
        let (_store, _clock, ledger) = setup();
        let service = TransactionService::new(&ledger);
        let account = AccountId::new();

        let expense = service
            .create(CreateTransactionInput::new(account, TransactionKind::Expense, 1000, "USD", date(10)))
            .unwrap();
        service
            .create(CreateTransactionInput::new(account, TransactionKind::Income, 2500, "USD", date(5)))
            .unwrap();

        let all = service.query(None, None).unwrap();
        assert_eq!(all.total_count, 2);
        assert_eq!(all.total_amount_minor, 1500);
        assert_eq!(all.transactions[0].date, date(5));

        let expenses = TransactionFilter::new().kinds([TransactionKind::Expense]);
        let only = service.query(Some(&expenses), None).unwrap();
        assert_eq!(only.total_count, 1);
        assert_eq!(only.total_amount_minor, -1000);

        service.soft_delete(expense.id).unwrap();
        let after = service.query(None, None).unwrap();
        assert_eq!(after.total_count, 1);
        assert_eq!(after.total_amount_minor, 2500);
    }

    #[test]
    fn test_get_hides_deleted() {
        let (_store, _clock, ledger) = setup();
        let service = TransactionService::new(&ledger);
        let txn = service
            .create(CreateTransactionInput::new(AccountId::new(), TransactionKind::Income, 100, "USD", date(1)))
            .unwrap();
        assert_eq!(service.get(txn.id).unwrap().id, txn.id);

        service.soft_delete(txn.id).unwrap();
        assert!(service.get(txn.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_unwritable_audit_log_does_not_fail_saved_transfer() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let (store, _clock, ledger) = setup();
        // A directory cannot be opened for appending
        let ledger = ledger.with_audit(AuditLogger::new(temp_dir.path()));
        let service = TransactionService::new(&ledger);

        let input = CreateTransferInput {
            source_account_id: AccountId::new(),
            target_account_id: AccountId::new(),
            currency: "USD".into(),
            amount_minor: 900,
            date: date(12),
            note: None,
            tags: Vec::new(),
            counterparty_name: None,
        };
        let (debit, credit) = service.create_transfer(input).unwrap();

        let saved = store.load_all_transactions().unwrap();
        assert_eq!(saved.len(), 2);
        assert!(saved.contains(&debit));
        assert!(saved.contains(&credit));

        let txn = service
            .create(CreateTransactionInput::new(AccountId::new(), TransactionKind::Income, 50, "USD", date(13)))
            .unwrap();
        service.soft_delete(txn.id).unwrap();
        assert_eq!(store.load_all_transactions().unwrap().len(), 3);
    }
}
