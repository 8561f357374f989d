//! Account model
//!
//! An account holds money in one currency. Its current balance is never
//! stored; it is derived from the initial balance plus the signed amounts of
//! its transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::{is_safe_integer, CurrencyCode};

/// A financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Display name (e.g., "Checking")
    pub name: String,

    /// Currency of every amount booked on this account
    pub currency: CurrencyCode,

    /// Opening balance in minor units
    pub initial_balance_minor: i64,

    /// Archived accounts stay visible in balances but take no new activity
    #[serde(default)]
    pub is_archived: bool,

    /// Soft-delete marker
    #[serde(default)]
    pub is_deleted: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account stamped with `now`
    pub fn new(
        name: impl Into<String>,
        currency: impl Into<CurrencyCode>,
        initial_balance_minor: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            currency: currency.into(),
            initial_balance_minor,
            is_archived: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Archive the account
    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.is_archived = true;
        self.updated_at = now;
    }

    /// Soft-delete the account
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.is_deleted = true;
        self.updated_at = now;
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }
        if self.currency.trim().is_empty() {
            return Err(AccountValidationError::EmptyCurrency);
        }
        if !is_safe_integer(self.initial_balance_minor) {
            return Err(AccountValidationError::UnsafeBalance(
                self.initial_balance_minor,
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.currency)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    EmptyCurrency,
    UnsafeBalance(i64),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::EmptyCurrency => write!(f, "Account currency cannot be empty"),
            Self::UnsafeBalance(v) => write!(
                f,
                "Initial balance {} is outside the safe integer range",
                v
            ),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("Checking", "USD", 1000, Utc::now());
        assert_eq!(account.initial_balance_minor, 1000);
        assert!(!account.is_archived);
        assert!(!account.is_deleted);
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let now = Utc::now();
        let account = Account::new("  ", "USD", 0, now);
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));

        let account = Account::new("Cash", "USD", i64::MAX, now);
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::UnsafeBalance(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let account = Account::new("Savings", "EUR", 50, Utc::now());
        let json = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account, back);
    }
}
