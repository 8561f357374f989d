//! Goal service
//!
//! Savings goals carry no aggregation; this is create, update and list.

use chrono::NaiveDate;

use super::Ledger;
use crate::audit::EntityType;
use crate::error::{DericerError, DericerResult};
use crate::models::{CurrencyCode, FieldPatch, Goal, GoalId};

/// Service for savings goals
pub struct GoalService<'a> {
    ledger: &'a Ledger,
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub name: String,
    pub target_amount_minor: i64,
    pub currency: CurrencyCode,
    pub target_date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Partial update of a goal
///
/// `is_deleted` toggles soft deletion in either direction.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalInput {
    pub name: Option<String>,
    pub target_amount_minor: Option<i64>,
    pub currency: Option<CurrencyCode>,
    pub target_date: FieldPatch<NaiveDate>,
    pub note: FieldPatch<String>,
    pub is_deleted: Option<bool>,
}

fn audit_id(id: GoalId) -> String {
    id.as_uuid().to_string()
}

impl<'a> GoalService<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn create(&self, input: CreateGoalInput) -> DericerResult<Goal> {
        if input.target_amount_minor <= 0 {
            return Err(DericerError::Validation(
                "Goal target amount must be positive".into(),
            ));
        }

        let mut goal = Goal::new(
            input.name,
            input.target_amount_minor,
            input.currency,
            self.ledger.now(),
        );
        goal.target_date = input.target_date;
        goal.note = input.note;

        self.ledger.store().save_goal(&goal)?;

        tracing::debug!(goal = %goal.id, "created goal");
        self.ledger.log_create(
            EntityType::Goal,
            audit_id(goal.id),
            Some(goal.name.clone()),
            &goal,
        );

        Ok(goal)
    }

    /// Apply a partial update
    ///
    /// Soft-deleted goals can still be updated, which is how they are
    /// restored. The target amount is taken as given.
    pub fn update(&self, id: GoalId, changes: UpdateGoalInput) -> DericerResult<Goal> {
        let before = self
            .ledger
            .store()
            .get_goal_by_id(id)?
            .ok_or_else(|| DericerError::goal_not_found(id.to_string()))?;

        let mut goal = before.clone();
        if let Some(name) = changes.name {
            goal.name = name;
        }
        if let Some(amount) = changes.target_amount_minor {
            goal.target_amount_minor = amount;
        }
        if let Some(currency) = changes.currency {
            goal.currency = currency;
        }
        if let Some(is_deleted) = changes.is_deleted {
            goal.is_deleted = is_deleted;
        }
        goal.target_date = changes.target_date.apply(goal.target_date);
        goal.note = changes.note.apply(goal.note);
        goal.updated_at = self.ledger.now();

        self.ledger.store().save_goal(&goal)?;

        tracing::debug!(goal = %goal.id, "updated goal");
        if goal.is_deleted && !before.is_deleted {
            self.ledger
                .log_delete(EntityType::Goal, audit_id(id), Some(before.name.clone()), &before);
        } else {
            self.ledger
                .log_update(EntityType::Goal, audit_id(id), Some(goal.name.clone()), &before, &goal);
        }

        Ok(goal)
    }

    /// Goals that are not soft-deleted
    pub fn list_active(&self) -> DericerResult<Vec<Goal>> {
        let mut goals = self.ledger.store().load_all_goals()?;
        goals.retain(|g| !g.is_deleted);
        Ok(goals)
    }
}
