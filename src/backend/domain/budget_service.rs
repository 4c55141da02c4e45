//! Budget service: evaluation of spend against limits and limit edits.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::backend::domain::commands::budgets::UpdateBudgetCommand;
use crate::backend::domain::ledger_service::spend_by_category;
use crate::backend::domain::models::{Budget, Category, FinancialData};
use crate::backend::storage::traits::{BudgetStore, Connection};

/// A budget together with how it stands against actual spend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: f64,
    pub remaining: f64,
    /// Percent of the limit consumed. A zero limit with any spend reports
    /// the 100.0 sentinel (the true ratio is undefined) and is flagged
    /// exceeded.
    pub progress_percent: f64,
    pub is_exceeded: bool,
}

/// Evaluate one budget against a precomputed spend-by-category map.
pub fn evaluate(budget: &Budget, spend: &HashMap<Category, f64>) -> BudgetStatus {
    let spent = spend.get(&budget.category).copied().unwrap_or(0.0);
    let remaining = budget.limit - spent;
    let progress_percent = if budget.limit > 0.0 {
        spent / budget.limit * 100.0
    } else if spent > 0.0 {
        100.0
    } else {
        0.0
    };
    BudgetStatus {
        budget: budget.clone(),
        spent,
        remaining,
        progress_percent,
        is_exceeded: remaining < 0.0,
    }
}

/// Evaluate every budget in the dataset.
pub fn evaluate_all(data: &FinancialData) -> Vec<BudgetStatus> {
    let spend = spend_by_category(&data.transactions);
    data.budgets.iter().map(|b| evaluate(b, &spend)).collect()
}

#[derive(Clone)]
pub struct BudgetService<C: Connection> {
    budgets: C::Budgets,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            budgets: connection.budget_repository(),
        }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Budget>> {
        self.budgets.list_budgets().await
    }

    /// Replace a budget record atomically, keyed by id. Past spend is never
    /// recomputed; only the limit going forward changes.
    pub async fn update_budget(
        &self,
        data: &mut FinancialData,
        command: UpdateBudgetCommand,
    ) -> Result<Budget> {
        if !command.limit.is_finite() || command.limit < 0.0 {
            return Err(anyhow!("Budget limit must be a non-negative number"));
        }
        if data.budget(&command.id).is_none() {
            return Err(anyhow!("no budget with id {}", command.id));
        }

        let replacement = Budget {
            id: command.id.clone(),
            category: command.category,
            limit: command.limit,
        };
        let stored = self.budgets.update_budget(&replacement).await?;
        if let Some(slot) = data.budgets.iter_mut().find(|b| b.id == stored.id) {
            *slot = stored.clone();
        }
        info!(id = %stored.id, category = %stored.category, "updated budget limit");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::seed::seed_data;
    use crate::backend::storage::memory::MemoryConnection;

    fn budget(limit: f64) -> Budget {
        Budget {
            id: "b1".to_string(),
            category: Category::Food,
            limit,
        }
    }

    #[test]
    fn overspent_budget_is_flagged() {
        let mut spend = HashMap::new();
        spend.insert(Category::Food, 1200.0);
        let status = evaluate(&budget(1000.0), &spend);
        assert!(status.is_exceeded);
        assert_eq!(status.remaining, -200.0);
        assert!((status.progress_percent - 120.0).abs() < 1e-9);
    }

    #[test]
    fn unspent_category_reads_as_zero() {
        let status = evaluate(&budget(1000.0), &HashMap::new());
        assert_eq!(status.spent, 0.0);
        assert_eq!(status.remaining, 1000.0);
        assert!(!status.is_exceeded);
    }

    #[test]
    fn zero_limit_with_spend_uses_the_sentinel() {
        let mut spend = HashMap::new();
        spend.insert(Category::Food, 50.0);
        let status = evaluate(&budget(0.0), &spend);
        assert!(status.is_exceeded);
        assert_eq!(status.progress_percent, 100.0);
        assert_eq!(status.remaining, -50.0);
    }

    #[test]
    fn zero_limit_without_spend_is_not_exceeded() {
        let status = evaluate(&budget(0.0), &HashMap::new());
        assert!(!status.is_exceeded);
        assert_eq!(status.progress_percent, 0.0);
    }

    #[test]
    fn evaluate_all_covers_every_budget() {
        let data = seed_data();
        let statuses = evaluate_all(&data);
        assert_eq!(statuses.len(), data.budgets.len());
        // Bills: 8000 + 250 spent against 8500.
        let bills = statuses
            .iter()
            .find(|s| s.budget.category == Category::Bills)
            .unwrap();
        assert_eq!(bills.spent, 8250.0);
        assert!(!bills.is_exceeded);
    }

    #[tokio::test]
    async fn update_budget_replaces_record_everywhere() {
        let conn = MemoryConnection::with_data(seed_data());
        let service = BudgetService::new(&conn);
        let mut data = conn.snapshot().await;

        let command = UpdateBudgetCommand {
            id: "b1".to_string(),
            category: Category::Food,
            limit: 3500.0,
        };
        let stored = service.update_budget(&mut data, command).await.unwrap();
        assert_eq!(stored.limit, 3500.0);
        assert_eq!(data.budget("b1").unwrap().limit, 3500.0);
        assert_eq!(conn.snapshot().await.budget("b1").unwrap().limit, 3500.0);
    }

    #[tokio::test]
    async fn update_budget_validates_before_writing() {
        let conn = MemoryConnection::with_data(seed_data());
        let service = BudgetService::new(&conn);
        let mut data = conn.snapshot().await;

        let command = UpdateBudgetCommand {
            id: "b1".to_string(),
            category: Category::Food,
            limit: f64::INFINITY,
        };
        assert!(service.update_budget(&mut data, command).await.is_err());

        let unknown = UpdateBudgetCommand {
            id: "nope".to_string(),
            category: Category::Food,
            limit: 100.0,
        };
        assert!(service.update_budget(&mut data, unknown).await.is_err());
        assert_eq!(conn.snapshot().await.budget("b1").unwrap().limit, 3000.0);
    }
}
