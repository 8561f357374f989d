//! Public facade
//!
//! [`Core`] exposes the ledger grouped by entity (`accounts`, `categories`,
//! `transactions`, `reports`, `budgets`, `goals`, `currencies`) and returns
//! DTOs from [`dto`].

pub mod dto;
pub mod facade;

pub use facade::{
    AccountsApi, BudgetsApi, CategoriesApi, Core, CurrenciesApi, GoalsApi, ReportsApi,
    TransactionsApi,
};
pub use dto::{
    AccountBalanceDto, AccountDto, BudgetDto, BudgetStatusDto, CategoryDto, GoalDto,
    TransactionDto, TransactionQueryResult,
};
