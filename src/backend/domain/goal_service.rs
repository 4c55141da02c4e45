//! Goal service: progress/deadline views and whole-record edits.

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::backend::domain::commands::goals::UpdateGoalCommand;
use crate::backend::domain::models::{FinancialData, Goal};
use crate::backend::storage::traits::{Connection, GoalStore};

/// How a goal stands today.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    /// Unclamped funding ratio in percent; an over-funded goal exceeds 100.
    pub ratio_percent: f64,
    /// The ratio clamped to 0..=100 for progress-bar rendering.
    pub bar_percent: f64,
    /// Whole days until the deadline. Negative means past due and is
    /// surfaced as-is, never hidden.
    pub days_left: i64,
}

/// Pure progress computation; `today` is a parameter so callers and tests
/// control the clock.
pub fn progress(goal: &Goal, today: NaiveDate) -> GoalProgress {
    let ratio_percent = if goal.target_amount > 0.0 {
        goal.current_amount / goal.target_amount * 100.0
    } else {
        0.0
    };
    GoalProgress {
        ratio_percent,
        bar_percent: ratio_percent.clamp(0.0, 100.0),
        days_left: (goal.deadline - today).num_days(),
    }
}

#[derive(Clone)]
pub struct GoalService<C: Connection> {
    goals: C::Goals,
}

impl<C: Connection> GoalService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            goals: connection.goal_repository(),
        }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Goal>> {
        self.goals.list_goals().await
    }

    /// Progress for every goal against the local clock.
    pub fn progress_today(&self, data: &FinancialData) -> Vec<(Goal, GoalProgress)> {
        let today = Local::now().date_naive();
        data.goals
            .iter()
            .map(|g| (g.clone(), progress(g, today)))
            .collect()
    }

    /// Replace a goal record atomically, keyed by id. All mutable fields
    /// are supplied; there is no partial update.
    pub async fn update_goal(
        &self,
        data: &mut FinancialData,
        command: UpdateGoalCommand,
    ) -> Result<Goal> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(anyhow!("Goal name cannot be empty"));
        }
        if !command.target_amount.is_finite() || command.target_amount <= 0.0 {
            return Err(anyhow!("Goal target amount must be positive"));
        }
        if !command.current_amount.is_finite() || command.current_amount < 0.0 {
            return Err(anyhow!("Goal saved amount must be non-negative"));
        }
        if data.goal(&command.id).is_none() {
            return Err(anyhow!("no goal with id {}", command.id));
        }

        let replacement = Goal {
            id: command.id.clone(),
            name,
            target_amount: command.target_amount,
            current_amount: command.current_amount,
            deadline: command.deadline,
        };
        let stored = self.goals.update_goal(&replacement).await?;
        if let Some(slot) = data.goals.iter_mut().find(|g| g.id == stored.id) {
            *slot = stored.clone();
        }
        info!(id = %stored.id, "updated goal");
        Ok(stored)
    }
}
