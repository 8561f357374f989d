//! Export module for Dericer
//!
//! Serializes transactions and query results for use outside the ledger:
//! - CSV: spreadsheet-compatible rows, with a matching parser for re-import
//! - JSON: the same DTO shape the API returns

pub mod csv;
pub mod json;

pub use self::csv::{
    parse_transactions_csv, query_result_to_csv, transactions_to_csv, write_transactions_csv,
    TRANSACTION_CSV_HEADER,
};
pub use self::json::{query_result_to_json, transactions_to_json, write_transactions_json};
