//! Integration tests for CSV and JSON export of facade query results.

mod common;

use std::collections::HashSet;

use common::{date, TestLedger};
use dericer::export::{parse_transactions_csv, query_result_to_csv, query_result_to_json, TRANSACTION_CSV_HEADER};
use dericer::models::TransactionKind;
use dericer::services::CreateTransactionInput;

fn seed_tagged(ledger: &TestLedger) {
    let account = ledger.seed_account("Checking", "USD", 0);
    let food = ledger.seed_category("Food", None);

    let tag_sets: [&[&str]; 3] = [&["food", "weekly"], &[], &["rent"]];
    for (day, tags) in (1..).zip(tag_sets) {
        let mut input = CreateTransactionInput::new(account, TransactionKind::Expense, 100 * day as i64, "USD", date(2025, 6, day));
        input.tags = tags.iter().map(|t| t.to_string()).collect();
        input.category_id = Some(food);
        ledger.core.transactions().create(input).unwrap();
    }
}

#[test]
fn test_csv_export_restores_tags() {
    let ledger = TestLedger::new();
    seed_tagged(&ledger);

    let result = ledger.core.transactions().query(None, None).unwrap();
    let csv = query_result_to_csv(&result);
    assert_eq!(csv.lines().next().unwrap(), TRANSACTION_CSV_HEADER.join(","));
    assert_eq!(csv.lines().count(), 4);

    let parsed = parse_transactions_csv(&csv).unwrap();
    assert_eq!(parsed.len(), result.transactions.len());
    for (original, restored) in result.transactions.iter().zip(&parsed) {
        let before: HashSet<_> = original.tags.iter().collect();
        let after: HashSet<_> = restored.tags.iter().collect();
        assert_eq!(before, after);
        assert_eq!(original, restored);
    }
}

#[test]
fn test_json_export_carries_totals() {
    let ledger = TestLedger::new();
    seed_tagged(&ledger);

    let result = ledger.core.transactions().query(None, None).unwrap();
    let json = query_result_to_json(&result).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["totalCount"], 3);
    assert_eq!(value["totalAmountMinor"], -600);
    assert_eq!(value["transactions"][0]["tags"][1], "weekly");
}
