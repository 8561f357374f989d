//! JSON export for transactions and query results

use std::io::Write;

use crate::api::dto::{TransactionDto, TransactionQueryResult};
use crate::error::{DericerError, DericerResult};

/// Render transactions as a pretty-printed JSON array
pub fn transactions_to_json(transactions: &[TransactionDto]) -> DericerResult<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

/// Render a query result, totals included, as pretty-printed JSON
pub fn query_result_to_json(result: &TransactionQueryResult) -> DericerResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Write transactions as JSON to `writer`
pub fn write_transactions_json<W: Write>(
    transactions: &[TransactionDto],
    writer: &mut W,
) -> DericerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, transactions)
        .map_err(|e| DericerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| DericerError::Export(e.to_string()))?;
    Ok(())
}
