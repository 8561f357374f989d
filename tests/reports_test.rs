//! Integration tests for grouped sums and the combined category report.

mod common;

use common::{date, TestLedger};
use dericer::models::TransactionKind;
use dericer::reports::{SortField, TransactionFilter, TransactionSort};

#[test]
fn test_sum_by_category_rolls_up_to_ancestors() {
    let ledger = TestLedger::new();
    let account = ledger.seed_account("Checking", "USD", 0);
    let food = ledger.seed_category("Food", None);
    let restaurant = ledger.seed_category("Restaurant", Some(food));
    let sushi = ledger.seed_category("Sushi", Some(restaurant));

    ledger.record(account, TransactionKind::Expense, 1500, "USD", date(2025, 3, 1), Some(sushi));
    ledger.record(account, TransactionKind::Expense, 500, "USD", date(2025, 3, 2), Some(food));
    ledger.record(account, TransactionKind::Expense, 9999, "USD", date(2025, 3, 3), None);

    let sums = ledger.core.reports().sum_by_category(None).unwrap();
    let total_for = |id| sums.iter().find(|s| s.key == id).map(|s| s.total_minor);

    assert_eq!(total_for(sushi), Some(-1500));
    assert_eq!(total_for(restaurant), Some(-1500));
    assert_eq!(total_for(food), Some(-2000));
    assert_eq!(sums.len(), 3);
}

#[test]
fn test_sum_by_account_and_currency() {
    let ledger = TestLedger::new();
    let checking = ledger.seed_account("Checking", "USD", 0);
    let wallet = ledger.seed_account("Wallet", "EUR", 0);

    ledger.record(checking, TransactionKind::Income, 1000, "USD", date(2025, 3, 1), None);
    ledger.record(checking, TransactionKind::Expense, 250, "USD", date(2025, 3, 2), None);
    ledger.record(wallet, TransactionKind::Expense, 80, "EUR", date(2025, 3, 2), None);

    let by_account = ledger.core.reports().sum_by_account(None).unwrap();
    assert_eq!(by_account.len(), 2);
    assert_eq!(by_account[0].key, checking);
    assert_eq!(by_account[0].total_minor, 750);
    assert_eq!(by_account[1].total_minor, -80);

    let by_currency = ledger.core.reports().sum_by_currency(None).unwrap();
    let codes: Vec<_> = by_currency.iter().map(|s| (s.key.as_str(), s.total_minor)).collect();
    assert_eq!(codes, vec![("USD", 750), ("EUR", -80)]);
}

#[test]
fn test_query_and_sum_share_the_filtered_set() {
    let ledger = TestLedger::new();
    let account = ledger.seed_account("Checking", "USD", 0);
    let food = ledger.seed_category("Food", None);
    let travel = ledger.seed_category("Travel", None);

    ledger.record(account, TransactionKind::Expense, 300, "USD", date(2025, 4, 1), Some(food));
    ledger.record(account, TransactionKind::Expense, 200, "USD", date(2025, 4, 2), Some(travel));
    ledger.record(account, TransactionKind::Income, 50, "USD", date(2025, 4, 3), Some(food));

    let filter = TransactionFilter::new().categories([food]);
    let sort = TransactionSort::desc(SortField::AmountMinor);
    let (listing, sums) = ledger
        .core
        .reports()
        .query_and_sum_by_category(Some(&filter), Some(&sort))
        .unwrap();

    assert_eq!(listing.total_count, 2);
    assert_eq!(listing.total_amount_minor, -250);
    assert_eq!(listing.transactions[0].kind, TransactionKind::Income);
    assert_eq!(sums.len(), 1);
    assert_eq!(sums[0].key, food);
    assert_eq!(sums[0].total_minor, listing.total_amount_minor);
}

#[test]
fn test_search_and_tag_filters() {
    let ledger = TestLedger::new();
    let account = ledger.seed_account("Checking", "USD", 0);

    let mut input = dericer::services::CreateTransactionInput::new(
        account,
        TransactionKind::Expense,
        1800,
        "USD",
        date(2025, 5, 1),
    );
    input.tags = vec!["travel".into(), "work".into()];
    input.counterparty_name = Some("Northern Rail".into());
    ledger.core.transactions().create(input).unwrap();
    ledger.record(account, TransactionKind::Expense, 400, "USD", date(2025, 5, 2), None);

    let by_tags = TransactionFilter::new().with_tags(["work", "travel"]);
    let result = ledger.core.reports().query_transactions(Some(&by_tags), None).unwrap();
    assert_eq!(result.total_count, 1);

    let by_text = TransactionFilter::new().search("RAIL");
    let result = ledger.core.reports().query_transactions(Some(&by_text), None).unwrap();
    assert_eq!(result.total_amount_minor, -1800);

    let none = TransactionFilter::new().with_tags(["work", "holiday"]);
    let result = ledger.core.reports().query_transactions(Some(&none), None).unwrap();
    assert_eq!(result.total_count, 0);
}
