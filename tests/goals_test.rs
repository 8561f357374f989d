//! Integration tests for savings goals.

mod common;

use common::{date, TestLedger};
use dericer::audit::{EntityType, Operation};
use dericer::models::{FieldPatch, GoalId};
use dericer::services::{CreateGoalInput, UpdateGoalInput};

fn vacation_input() -> CreateGoalInput {
    CreateGoalInput {
        name: "Vacation".into(),
        target_amount_minor: 300000,
        currency: "EUR".into(),
        target_date: Some(date(2025, 8, 1)),
        note: Some("Lisbon".into()),
    }
}

#[test]
fn test_create_rejects_non_positive_target() {
    let ledger = TestLedger::new();
    let mut input = vacation_input();
    input.target_amount_minor = 0;

    assert!(ledger.core.goals().create(input).unwrap_err().is_validation());
    assert!(ledger.core.goals().list().unwrap().is_empty());
}

#[test]
fn test_update_patches_and_soft_deletes() {
    let ledger = TestLedger::new();
    let goal = ledger.core.goals().create(vacation_input()).unwrap();

    let updated = ledger
        .core
        .goals()
        .update(
            goal.id,
            UpdateGoalInput {
                target_date: FieldPatch::Clear,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.target_date, None);
    assert_eq!(updated.note.as_deref(), Some("Lisbon"));

    ledger
        .core
        .goals()
        .update(
            goal.id,
            UpdateGoalInput {
                is_deleted: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(ledger.core.goals().list().unwrap().is_empty());

    let restored = ledger
        .core
        .goals()
        .update(
            goal.id,
            UpdateGoalInput {
                is_deleted: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(!restored.is_deleted);
    assert_eq!(ledger.core.goals().list().unwrap().len(), 1);

    let operations: Vec<_> = ledger
        .audit()
        .read_all()
        .unwrap()
        .into_iter()
        .filter(|e| e.entity_type == EntityType::Goal)
        .map(|e| e.operation)
        .collect();
    assert_eq!(
        operations,
        vec![Operation::Create, Operation::Update, Operation::Delete, Operation::Update]
    );
}

#[test]
fn test_update_missing_goal_is_not_found() {
    let ledger = TestLedger::new();
    let err = ledger
        .core
        .goals()
        .update(GoalId::new(), UpdateGoalInput::default())
        .unwrap_err();
    assert!(err.is_not_found());
}
