//! Savings goal model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::CurrencyCode;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub name: String,

    /// Amount to save, in minor units
    pub target_amount_minor: i64,

    pub currency: CurrencyCode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub is_deleted: bool,
}

impl Goal {
    /// Create a new goal stamped with `now`
    pub fn new(
        name: impl Into<String>,
        target_amount_minor: i64,
        currency: impl Into<CurrencyCode>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount_minor,
            currency: currency.into(),
            target_date: None,
            note: None,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {})",
            self.name, self.target_amount_minor, self.currency
        )
    }
}
