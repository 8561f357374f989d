//! Dericer - personal finance ledger core
//!
//! This library records accounts, transactions, hierarchical categories,
//! budgets and savings goals, and answers the questions asked of that data:
//! account balances, filtered transaction queries with totals, sums grouped
//! by account, category or currency, and how much of each budget is spent.
//! It has no user interface of its own; hosts drive it through [`Core`].
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `api`: The [`Core`] facade and the DTOs it returns
//! - `audit`: Append-only JSON-lines audit log of every mutation
//! - `clock`: Injectable time source
//! - `config`: Data directory resolution, settings and logging setup
//! - `error`: Custom error types
//! - `export`: CSV and JSON export of transactions
//! - `models`: Core data models (accounts, transactions, categories, etc.)
//! - `reports`: Pure query, aggregation and budget evaluation functions
//! - `services`: Business logic layer over a [`storage::LedgerStore`]
//! - `storage`: JSON file and in-memory stores
//!
//! # Example
//!
//! ```rust,no_run
//! use dericer::config::DericerPaths;
//! use dericer::Core;
//!
//! # fn main() -> dericer::DericerResult<()> {
//! let paths = DericerPaths::new()?;
//! let core = Core::open(&paths)?;
//! for balance in core.accounts().get_balances()? {
//!     println!("{} {} {}", balance.account_id, balance.balance_minor, balance.currency);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod audit;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use api::Core;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DericerError, DericerResult};
