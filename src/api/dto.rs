//! Transport shapes returned by the facade
//!
//! DTOs serialize with camelCase keys, dates as `YYYY-MM-DD` and timestamps
//! as RFC 3339.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Account, AccountId, Budget, BudgetId, Category, CategoryId, CurrencyCode, Goal, GoalId,
    Transaction, TransactionId, TransactionKind, TransferGroupId,
};
use crate::reports::{AccountBalance, BudgetStatus};
use crate::services::TransactionQuery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: AccountId,
    pub name: String,
    pub currency: CurrencyCode,
    pub initial_balance_minor: i64,
    pub is_archived: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            currency: account.currency.clone(),
            initial_balance_minor: account.initial_balance_minor,
            is_archived: account.is_archived,
            is_deleted: account.is_deleted,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
    pub is_deleted: bool,
}

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            parent_id: category.parent_id,
            is_deleted: category.is_deleted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub currency: CurrencyCode,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_group_id: Option<TransferGroupId>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionDto {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id,
            account_id: txn.account_id,
            kind: txn.kind,
            amount_minor: txn.amount_minor,
            currency: txn.currency.clone(),
            date: txn.date,
            note: txn.note.clone(),
            category_id: txn.category_id,
            tags: txn.tags.clone(),
            counterparty_name: txn.counterparty_name.clone(),
            transfer_group_id: txn.transfer_group_id,
            is_deleted: txn.is_deleted,
            created_at: txn.created_at,
            updated_at: txn.updated_at,
        }
    }
}

impl From<TransactionDto> for Transaction {
    fn from(dto: TransactionDto) -> Self {
        Self {
            id: dto.id,
            account_id: dto.account_id,
            kind: dto.kind,
            amount_minor: dto.amount_minor,
            currency: dto.currency,
            date: dto.date,
            note: dto.note,
            category_id: dto.category_id,
            tags: dto.tags,
            counterparty_name: dto.counterparty_name,
            transfer_group_id: dto.transfer_group_id,
            is_deleted: dto.is_deleted,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDto {
    pub id: BudgetId,
    pub category_id: CategoryId,
    pub currency: CurrencyCode,
    pub amount_minor: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_deleted: bool,
}

impl From<&Budget> for BudgetDto {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id,
            category_id: budget.category_id,
            currency: budget.currency.clone(),
            amount_minor: budget.amount_minor,
            start_date: budget.start_date,
            end_date: budget.end_date,
            name: budget.name.clone(),
            is_deleted: budget.is_deleted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatusDto {
    pub budget: BudgetDto,
    pub spent_minor: i64,
    pub remaining_minor: i64,
    pub percent_used: f64,
}

impl From<&BudgetStatus> for BudgetStatusDto {
    fn from(status: &BudgetStatus) -> Self {
        Self {
            budget: BudgetDto::from(&status.budget),
            spent_minor: status.spent_minor,
            remaining_minor: status.remaining_minor,
            percent_used: status.percent_used,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
    pub id: GoalId,
    pub name: String,
    pub target_amount_minor: i64,
    pub currency: CurrencyCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl From<&Goal> for GoalDto {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id,
            name: goal.name.clone(),
            target_amount_minor: goal.target_amount_minor,
            currency: goal.currency.clone(),
            target_date: goal.target_date,
            note: goal.note.clone(),
            created_at: goal.created_at,
            updated_at: goal.updated_at,
            is_deleted: goal.is_deleted,
        }
    }
}

/// Account balances already use transport-friendly field names
pub type AccountBalanceDto = AccountBalance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQueryResult {
    pub transactions: Vec<TransactionDto>,
    pub total_count: usize,
    pub total_amount_minor: i64,
}

impl From<&TransactionQuery> for TransactionQueryResult {
    fn from(query: &TransactionQuery) -> Self {
        Self {
            transactions: query.transactions.iter().map(TransactionDto::from).collect(),
            total_count: query.total_count,
            total_amount_minor: query.total_amount_minor,
        }
    }
}
