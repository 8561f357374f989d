//! CSV export and import for transactions
//!
//! One row per transaction under a fixed camelCase header. Ids are written as
//! full UUIDs, tags are space separated and timestamps are RFC 3339 in UTC.
//! Fields containing a comma, a double quote or a newline are quoted with
//! inner quotes doubled. Rows are joined with `\n` and there is no trailing
//! newline.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::api::dto::{TransactionDto, TransactionQueryResult};
use crate::error::{DericerError, DericerResult};
use crate::models::{parse_date, TransactionKind};

/// Column order of every transaction CSV
pub const TRANSACTION_CSV_HEADER: [&str; 14] = [
    "id",
    "accountId",
    "kind",
    "amountMinor",
    "currency",
    "date",
    "note",
    "categoryId",
    "tags",
    "counterpartyName",
    "transferGroupId",
    "createdAt",
    "updatedAt",
    "isDeleted",
];

/// Render transactions as CSV text
pub fn transactions_to_csv(transactions: &[TransactionDto]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(TRANSACTION_CSV_HEADER.join(","));
    lines.extend(transactions.iter().map(transaction_row));
    lines.join("\n")
}

/// Render the transactions of a query result as CSV text
pub fn query_result_to_csv(result: &TransactionQueryResult) -> String {
    transactions_to_csv(&result.transactions)
}

/// Write transactions as CSV to `writer`
pub fn write_transactions_csv<W: Write>(
    transactions: &[TransactionDto],
    writer: &mut W,
) -> DericerResult<()> {
    writer
        .write_all(transactions_to_csv(transactions).as_bytes())
        .map_err(|e| DericerError::Export(e.to_string()))
}

fn transaction_row(txn: &TransactionDto) -> String {
    let fields = [
        txn.id.as_uuid().to_string(),
        txn.account_id.as_uuid().to_string(),
        txn.kind.as_str().to_string(),
        txn.amount_minor.to_string(),
        txn.currency.clone(),
        txn.date.format("%Y-%m-%d").to_string(),
        txn.note.clone().unwrap_or_default(),
        txn.category_id
            .map(|id| id.as_uuid().to_string())
            .unwrap_or_default(),
        txn.tags.join(" "),
        txn.counterparty_name.clone().unwrap_or_default(),
        txn.transfer_group_id
            .map(|id| id.as_uuid().to_string())
            .unwrap_or_default(),
        format_timestamp(&txn.created_at),
        format_timestamp(&txn.updated_at),
        txn.is_deleted.to_string(),
    ];

    fields
        .iter()
        .map(|field| escape_csv(field))
        .collect::<Vec<_>>()
        .join(",")
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Quote a field only when it needs it
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Parse CSV text produced by [`transactions_to_csv`]
///
/// Columns are located by header name, so their order may differ. Empty
/// optional fields become `None` and tags are split on whitespace. A missing
/// column or an unparsable value fails the whole import.
pub fn parse_transactions_csv(input: &str) -> DericerResult<Vec<TransactionDto>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::None)
        .from_reader(input.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::new(&headers)?;

    let mut transactions = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1
        let line = index + 2;
        let row = Row {
            record: &record,
            columns: &columns,
            line,
        };
        transactions.push(row.to_transaction()?);
    }

    Ok(transactions)
}

struct ColumnIndex {
    positions: [usize; 14],
}

impl ColumnIndex {
    fn new(headers: &::csv::StringRecord) -> DericerResult<Self> {
        let mut positions = [0usize; 14];
        for (slot, name) in positions.iter_mut().zip(TRANSACTION_CSV_HEADER.iter()) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == *name)
                .ok_or_else(|| DericerError::Export(format!("Missing CSV column: {}", name)))?;
        }
        Ok(Self { positions })
    }

    fn position(&self, name: &str) -> usize {
        TRANSACTION_CSV_HEADER
            .iter()
            .position(|h| *h == name)
            .map(|i| self.positions[i])
            .unwrap_or(usize::MAX)
    }
}

struct Row<'a> {
    record: &'a ::csv::StringRecord,
    columns: &'a ColumnIndex,
    line: usize,
}

impl Row<'_> {
    fn field(&self, name: &str) -> &str {
        self.record.get(self.columns.position(name)).unwrap_or("")
    }

    fn optional(&self, name: &str) -> Option<String> {
        let value = self.field(name);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    fn invalid(&self, name: &str, detail: impl std::fmt::Display) -> DericerError {
        DericerError::Validation(format!("line {}: invalid {}: {}", self.line, name, detail))
    }

    fn parse_id<T>(&self, name: &str) -> DericerResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.field(name)
            .trim()
            .parse()
            .map_err(|e| self.invalid(name, e))
    }

    fn parse_optional_id<T>(&self, name: &str) -> DericerResult<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        if self.field(name).trim().is_empty() {
            Ok(None)
        } else {
            self.parse_id(name).map(Some)
        }
    }

    fn parse_timestamp(&self, name: &str) -> DericerResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.field(name).trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| self.invalid(name, e))
    }

    fn to_transaction(&self) -> DericerResult<TransactionDto> {
        let kind: TransactionKind = self
            .field("kind")
            .parse()
            .map_err(|e| self.invalid("kind", e))?;

        let amount_minor: i64 = self
            .field("amountMinor")
            .trim()
            .parse()
            .map_err(|e| self.invalid("amountMinor", e))?;

        let date = parse_date(self.field("date")).map_err(|e| self.invalid("date", e))?;

        let is_deleted = match self.field("isDeleted").trim() {
            "true" => true,
            "false" | "" => false,
            other => return Err(self.invalid("isDeleted", other)),
        };

        Ok(TransactionDto {
            id: self.parse_id("id")?,
            account_id: self.parse_id("accountId")?,
            kind,
            amount_minor,
            currency: self.field("currency").trim().to_string(),
            date,
            note: self.optional("note"),
            category_id: self.parse_optional_id("categoryId")?,
            tags: self
                .field("tags")
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            counterparty_name: self.optional("counterpartyName"),
            transfer_group_id: self.parse_optional_id("transferGroupId")?,
            is_deleted,
            created_at: self.parse_timestamp("createdAt")?,
            updated_at: self.parse_timestamp("updatedAt")?,
        })
    }
}
