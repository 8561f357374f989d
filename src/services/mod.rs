//! Service layer for Dericer
//!
//! Services are the only code that touches storage. Each borrows a
//! [`Ledger`], loads the snapshots it needs, calls into the pure `reports`
//! functions and persists the result.

pub mod account;
pub mod budget;
pub mod category;
pub mod context;
pub mod currency;
pub mod goal;
pub mod report;
pub mod transaction;

pub use account::AccountService;
pub use budget::BudgetService;
pub use category::CategoryService;
pub use context::Ledger;
pub use currency::CurrencyService;
pub use goal::{CreateGoalInput, GoalService, UpdateGoalInput};
pub use report::{CategoryQueryReport, ReportService};
pub use transaction::{
    CreateTransactionInput, CreateTransferInput, TransactionQuery, TransactionService,
    UpdateTransactionInput,
};
