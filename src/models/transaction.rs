//! Transaction model
//!
//! Amounts are stored as strictly positive minor units. The sign a
//! transaction contributes to balances and reports comes from its kind:
//! income and receivables add, expenses and debts subtract.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{AccountId, CategoryId, TransactionId, TransferGroupId};
use super::money::{CurrencyCode, MAX_SAFE_INTEGER};

/// Kind of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received
    Income,
    /// Money spent
    Expense,
    /// Money owed by the account holder
    Debt,
    /// Money owed to the account holder
    Receivable,
}

impl TransactionKind {
    /// All kinds, in declaration order
    pub const ALL: [TransactionKind; 4] = [
        Self::Income,
        Self::Expense,
        Self::Debt,
        Self::Receivable,
    ];

    /// Returns true if this kind adds to a balance
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Income | Self::Receivable)
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Debt => "debt",
            Self::Receivable => "receivable",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "debt" => Ok(Self::Debt),
            "receivable" => Ok(Self::Receivable),
            other => Err(format!("Unknown transaction kind: {}", other)),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Direction of the money movement
    pub kind: TransactionKind,

    /// Amount in minor units, always > 0
    pub amount_minor: i64,

    /// Currency code
    pub currency: CurrencyCode,

    /// Calendar date (no time component)
    pub date: NaiveDate,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Category ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    /// Tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Name of the other party
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_name: Option<String>,

    /// Shared by both legs of a transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_group_id: Option<TransferGroupId>,

    /// Soft-delete marker
    #[serde(default)]
    pub is_deleted: bool,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction stamped with `now`
    pub fn new(
        account_id: AccountId,
        kind: TransactionKind,
        amount_minor: i64,
        currency: impl Into<CurrencyCode>,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            kind,
            amount_minor,
            currency: currency.into(),
            date,
            note: None,
            category_id: None,
            tags: Vec::new(),
            counterparty_name: None,
            transfer_group_id: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount with the sign implied by the kind
    pub fn signed_amount_minor(&self) -> i64 {
        if self.kind.is_inflow() {
            self.amount_minor
        } else {
            -self.amount_minor
        }
    }

    /// Check if this transaction is one leg of a transfer
    pub fn is_transfer(&self) -> bool {
        self.transfer_group_id.is_some()
    }

    /// Check if the transaction carries every one of `tags`
    pub fn has_all_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|tag| self.tags.contains(tag))
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount_minor > MAX_SAFE_INTEGER {
            return Err(TransactionValidationError::UnsafeAmount(self.amount_minor));
        }

        if self.amount_minor <= 0 {
            return Err(TransactionValidationError::NonPositiveAmount(
                self.amount_minor,
            ));
        }

        if self.currency.trim().is_empty() {
            return Err(TransactionValidationError::MissingCurrency);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount_minor,
            self.currency
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    UnsafeAmount(i64),
    NonPositiveAmount(i64),
    MissingCurrency,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsafeAmount(v) => {
                write!(f, "Transaction amount_minor must be a safe integer, got {}", v)
            }
            Self::NonPositiveAmount(v) => {
                write!(f, "Transaction amount must be strictly positive, got {}", v)
            }
            Self::MissingCurrency => write!(f, "Transaction currency is required"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: TransactionKind, amount: i64) -> Transaction {
        Transaction::new(
            AccountId::new(),
            kind,
            amount,
            "USD",
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn test_signed_amount_follows_kind() {
        assert_eq!(sample(TransactionKind::Income, 700).signed_amount_minor(), 700);
        assert_eq!(
            sample(TransactionKind::Receivable, 700).signed_amount_minor(),
            700
        );
        assert_eq!(
            sample(TransactionKind::Expense, 700).signed_amount_minor(),
            -700
        );
        assert_eq!(sample(TransactionKind::Debt, 700).signed_amount_minor(), -700);
    }

    #[test]
    fn test_signed_amount_magnitude_is_amount() {
        for kind in TransactionKind::ALL {
            let txn = sample(kind, 12345);
            assert_eq!(txn.signed_amount_minor().abs(), txn.amount_minor);
        }
    }

    #[test]
    fn test_validation() {
        assert!(sample(TransactionKind::Expense, 1).validate().is_ok());
        assert_eq!(
            sample(TransactionKind::Expense, 0).validate(),
            Err(TransactionValidationError::NonPositiveAmount(0))
        );
        assert_eq!(
            sample(TransactionKind::Expense, MAX_SAFE_INTEGER + 1).validate(),
            Err(TransactionValidationError::UnsafeAmount(MAX_SAFE_INTEGER + 1))
        );
    }

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!("Expense".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert!("transfer".parse::<TransactionKind>().is_err());
        assert_eq!(TransactionKind::Receivable.to_string(), "receivable");
    }

    #[test]
    fn test_has_all_tags() {
        let mut txn = sample(TransactionKind::Expense, 100);
        txn.tags = vec!["food".into(), "work".into()];
        assert!(txn.has_all_tags(&["food".into()]));
        assert!(txn.has_all_tags(&["work".into(), "food".into()]));
        assert!(!txn.has_all_tags(&["food".into(), "travel".into()]));
        assert!(txn.has_all_tags(&[]));
    }

    #[test]
    fn test_serialization_omits_empty_optionals() {
        let txn = sample(TransactionKind::Income, 100);
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("category_id"));
        assert!(json.contains("\"kind\":\"income\""));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, back);
    }
}
