//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of mutation recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        };
        f.write_str(label)
    }
}

/// Ledger record types that appear in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Account,
    Transaction,
    Category,
    Budget,
    Goal,
    CurrencyConfig,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityType::Account => "Account",
            EntityType::Transaction => "Transaction",
            EntityType::Category => "Category",
            EntityType::Budget => "Budget",
            EntityType::Goal => "Goal",
            EntityType::CurrencyConfig => "CurrencyConfig",
        };
        f.write_str(label)
    }
}

/// One line of the audit log
///
/// `before` is present for updates and deletes, `after` for creates and
/// updates. Both hold the record as serialized to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Field-level change summary for updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn blank(
        timestamp: DateTime<Utc>,
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly created record
    pub fn create<T: Serialize>(
        timestamp: DateTime<Utc>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::blank(timestamp, Operation::Create, entity_type, entity_id, entity_name)
        }
    }

    /// Entry for a modified record, with a diff of its top-level fields
    pub fn update<T: Serialize>(
        timestamp: DateTime<Utc>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => super::generate_diff(b, a),
            _ => None,
        };

        Self {
            before,
            after,
            diff_summary,
            ..Self::blank(timestamp, Operation::Update, entity_type, entity_id, entity_name)
        }
    }

    /// Entry for a soft-deleted record
    pub fn delete<T: Serialize>(
        timestamp: DateTime<Utc>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::blank(timestamp, Operation::Delete, entity_type, entity_id, entity_name)
        }
    }

    /// Single-line rendering, with the diff on a second line when present
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }
        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(
            at(),
            EntityType::Goal,
            "goal-1",
            Some("Vacation".into()),
            &json!({"name": "Vacation"}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.timestamp, at());
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_entry_computes_diff() {
        let entry = AuditEntry::update(
            at(),
            EntityType::Transaction,
            "txn-1",
            None,
            &json!({"amount_minor": 500, "note": "lunch"}),
            &json!({"amount_minor": 750, "note": "lunch"}),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.diff_summary.as_deref(), Some("amount_minor: 500 -> 750"));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(at(), EntityType::Transaction, "txn-1", None, &json!({}));
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_entity_type_serializes_snake_case() {
        let json = serde_json::to_string(&EntityType::CurrencyConfig).unwrap();
        assert_eq!(json, "\"currency_config\"");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(
            at(),
            EntityType::Account,
            "acc-12345678",
            Some("Checking".into()),
            &json!({"name": "Checking"}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.starts_with("[2025-03-01 12:00:00 UTC] CREATE Account acc-12345678"));
        assert!(formatted.contains("(Checking)"));
    }
}
