//! The `Core` facade
//!
//! Groups the services by entity and converts their records to DTOs.
//! Listings never include soft-deleted records.

use std::sync::Arc;

use crate::audit::AuditLogger;
use crate::clock::{Clock, SystemClock};
use crate::config::{DericerPaths, Settings};
use crate::error::DericerResult;
use crate::models::{AccountId, BudgetId, CategoryId, CurrencyCode, CurrencyConfig, GoalId, TransactionId};
use crate::reports::{SumByGroup, TransactionFilter, TransactionSort};
use crate::services::{
    AccountService, BudgetService, CategoryService, CreateGoalInput, CreateTransactionInput,
    CreateTransferInput, CurrencyService, GoalService, Ledger, ReportService, TransactionService,
    UpdateGoalInput, UpdateTransactionInput,
};
use crate::storage::{JsonFileStore, LedgerStore};

use super::dto::{
    AccountBalanceDto, AccountDto, BudgetDto, BudgetStatusDto, CategoryDto, GoalDto, TransactionDto,
    TransactionQueryResult,
};

/// Entry point to the ledger
#[derive(Clone)]
pub struct Core {
    ledger: Ledger,
}

impl Core {
    pub fn new(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: Ledger::new(store, clock),
        }
    }

    /// Record every mutation in `logger`
    pub fn with_audit(self, logger: AuditLogger) -> Self {
        Self {
            ledger: self.ledger.with_audit(logger),
        }
    }

    /// Open the file-backed ledger under `paths`
    ///
    /// Writes default settings on first use, attaches the audit log when
    /// enabled and registers the default currency if no config exists for it.
    pub fn open(paths: &DericerPaths) -> DericerResult<Self> {
        let settings = Settings::load_or_create(paths)?;

        let store = JsonFileStore::from_paths(paths)?;
        let mut core = Self::new(Arc::new(store), Arc::new(SystemClock));
        if settings.audit_enabled {
            core = core.with_audit(AuditLogger::new(paths.audit_log()));
        }

        CurrencyService::new(&core.ledger).ensure_default(&settings)?;
        tracing::debug!(base_dir = %paths.base_dir().display(), "opened ledger");
        Ok(core)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi { ledger: &self.ledger }
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi { ledger: &self.ledger }
    }

    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi { ledger: &self.ledger }
    }

    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi { ledger: &self.ledger }
    }

    pub fn budgets(&self) -> BudgetsApi<'_> {
        BudgetsApi { ledger: &self.ledger }
    }

    pub fn goals(&self) -> GoalsApi<'_> {
        GoalsApi { ledger: &self.ledger }
    }

    pub fn currencies(&self) -> CurrenciesApi<'_> {
        CurrenciesApi { ledger: &self.ledger }
    }
}

pub struct AccountsApi<'a> {
    ledger: &'a Ledger,
}

impl AccountsApi<'_> {
    pub fn list_all(&self) -> DericerResult<Vec<AccountDto>> {
        let accounts = AccountService::new(self.ledger).list_active()?;
        Ok(accounts.iter().map(AccountDto::from).collect())
    }

    /// `None` when the account is missing or soft-deleted
    pub fn get_by_id(&self, id: AccountId) -> DericerResult<Option<AccountDto>> {
        let account = AccountService::new(self.ledger).get(id)?;
        Ok(account.as_ref().map(AccountDto::from))
    }

    pub fn get_balances(&self) -> DericerResult<Vec<AccountBalanceDto>> {
        AccountService::new(self.ledger).balances()
    }

    /// Per-currency totals, without currencies that are effectively zero
    pub fn get_currency_totals(&self) -> DericerResult<Vec<SumByGroup<CurrencyCode>>> {
        AccountService::new(self.ledger).visible_currency_totals()
    }
}

pub struct CategoriesApi<'a> {
    ledger: &'a Ledger,
}

impl CategoriesApi<'_> {
    pub fn list_all(&self) -> DericerResult<Vec<CategoryDto>> {
        let categories = CategoryService::new(self.ledger).list_active()?;
        Ok(categories.iter().map(CategoryDto::from).collect())
    }
}

pub struct TransactionsApi<'a> {
    ledger: &'a Ledger,
}

impl TransactionsApi<'_> {
    pub fn create(&self, input: CreateTransactionInput) -> DericerResult<TransactionDto> {
        let txn = TransactionService::new(self.ledger).create(input)?;
        Ok(TransactionDto::from(&txn))
    }

    /// Both legs, debit first
    pub fn create_transfer(&self, input: CreateTransferInput) -> DericerResult<[TransactionDto; 2]> {
        let (debit, credit) = TransactionService::new(self.ledger).create_transfer(input)?;
        Ok([TransactionDto::from(&debit), TransactionDto::from(&credit)])
    }

    pub fn update(&self, id: TransactionId, changes: UpdateTransactionInput) -> DericerResult<TransactionDto> {
        let txn = TransactionService::new(self.ledger).update(id, changes)?;
        Ok(TransactionDto::from(&txn))
    }

    pub fn soft_delete(&self, id: TransactionId) -> DericerResult<()> {
        TransactionService::new(self.ledger).soft_delete(id)
    }

    pub fn query(
        &self,
        filter: Option<&TransactionFilter>,
        sort: Option<&TransactionSort>,
    ) -> DericerResult<TransactionQueryResult> {
        let query = TransactionService::new(self.ledger).query(filter, sort)?;
        Ok(TransactionQueryResult::from(&query))
    }
}

pub struct ReportsApi<'a> {
    ledger: &'a Ledger,
}

impl ReportsApi<'_> {
    pub fn query_transactions(
        &self,
        filter: Option<&TransactionFilter>,
        sort: Option<&TransactionSort>,
    ) -> DericerResult<TransactionQueryResult> {
        let query = ReportService::new(self.ledger).query_transactions(filter, sort)?;
        Ok(TransactionQueryResult::from(&query))
    }

    pub fn sum_by_account(&self, filter: Option<&TransactionFilter>) -> DericerResult<Vec<SumByGroup<AccountId>>> {
        ReportService::new(self.ledger).sum_by_account(filter)
    }

    pub fn sum_by_category(&self, filter: Option<&TransactionFilter>) -> DericerResult<Vec<SumByGroup<CategoryId>>> {
        ReportService::new(self.ledger).sum_by_category(filter)
    }

    pub fn sum_by_currency(&self, filter: Option<&TransactionFilter>) -> DericerResult<Vec<SumByGroup<CurrencyCode>>> {
        ReportService::new(self.ledger).sum_by_currency(filter)
    }

    /// Listing and category roll-up of the same filtered set
    pub fn query_and_sum_by_category(
        &self,
        filter: Option<&TransactionFilter>,
        sort: Option<&TransactionSort>,
    ) -> DericerResult<(TransactionQueryResult, Vec<SumByGroup<CategoryId>>)> {
        let report = ReportService::new(self.ledger).query_and_sum_by_category(filter, sort)?;
        Ok((TransactionQueryResult::from(&report.query), report.by_category))
    }
}

pub struct BudgetsApi<'a> {
    ledger: &'a Ledger,
}

impl BudgetsApi<'_> {
    pub fn list_all(&self) -> DericerResult<Vec<BudgetDto>> {
        let budgets = BudgetService::new(self.ledger).list_active()?;
        Ok(budgets.iter().map(BudgetDto::from).collect())
    }

    pub fn evaluate_all(&self) -> DericerResult<Vec<BudgetStatusDto>> {
        let statuses = BudgetService::new(self.ledger).evaluate_all()?;
        Ok(statuses.iter().map(BudgetStatusDto::from).collect())
    }

    pub fn evaluate_one(&self, id: BudgetId) -> DericerResult<BudgetStatusDto> {
        let status = BudgetService::new(self.ledger).evaluate(id)?;
        Ok(BudgetStatusDto::from(&status))
    }

    pub fn spent_summary(&self) -> DericerResult<Vec<SumByGroup<BudgetId>>> {
        BudgetService::new(self.ledger).spent_summary()
    }
}

pub struct GoalsApi<'a> {
    ledger: &'a Ledger,
}

impl GoalsApi<'_> {
    pub fn list(&self) -> DericerResult<Vec<GoalDto>> {
        let goals = GoalService::new(self.ledger).list_active()?;
        Ok(goals.iter().map(GoalDto::from).collect())
    }

    pub fn create(&self, input: CreateGoalInput) -> DericerResult<GoalDto> {
        let goal = GoalService::new(self.ledger).create(input)?;
        Ok(GoalDto::from(&goal))
    }

    pub fn update(&self, id: GoalId, changes: UpdateGoalInput) -> DericerResult<GoalDto> {
        let goal = GoalService::new(self.ledger).update(id, changes)?;
        Ok(GoalDto::from(&goal))
    }
}

pub struct CurrenciesApi<'a> {
    ledger: &'a Ledger,
}

impl CurrenciesApi<'_> {
    pub fn list(&self) -> DericerResult<Vec<CurrencyConfig>> {
        CurrencyService::new(self.ledger).list()
    }

    pub fn register(&self, config: CurrencyConfig) -> DericerResult<CurrencyConfig> {
        CurrencyService::new(self.ledger).register(config)
    }
}
