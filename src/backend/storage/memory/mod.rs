//! # In-Memory Store
//!
//! A [`Connection`] whose repositories share a single mutex-guarded dataset.
//! This is the test double for the REST collaborator and doubles as an
//! offline mode. Ids are locally-assigned UUIDs, mirroring the opaque ids
//! the remote store hands out.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::domain::models::{Budget, FinancialData, Goal, NewTransaction, Transaction};
use crate::backend::storage::traits::{BudgetStore, Connection, GoalStore, TransactionStore};

#[derive(Clone, Default)]
pub struct MemoryConnection {
    data: Arc<Mutex<FinancialData>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing dataset, e.g. the demo seed.
    pub fn with_data(data: FinancialData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Snapshot the current dataset. Test helper.
    pub async fn snapshot(&self) -> FinancialData {
        self.data.lock().await.clone()
    }

    fn assign_id(new: &NewTransaction) -> Transaction {
        Transaction {
            id: Uuid::new_v4().to_string(),
            date: new.date,
            description: new.description.clone(),
            amount: new.amount,
            category: new.category,
            kind: new.kind,
        }
    }
}

impl Connection for MemoryConnection {
    type Transactions = MemoryConnection;
    type Budgets = MemoryConnection;
    type Goals = MemoryConnection;

    fn transaction_repository(&self) -> Self::Transactions {
        self.clone()
    }

    fn budget_repository(&self) -> Self::Budgets {
        self.clone()
    }

    fn goal_repository(&self) -> Self::Goals {
        self.clone()
    }
}

#[async_trait]
impl TransactionStore for MemoryConnection {
    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.data.lock().await.transactions.clone())
    }

    async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        let created = Self::assign_id(new);
        self.data.lock().await.transactions.push(created.clone());
        Ok(created)
    }

    async fn create_transactions_bulk(&self, new: &[NewTransaction]) -> Result<Vec<Transaction>> {
        let created: Vec<Transaction> = new.iter().map(Self::assign_id).collect();
        self.data
            .lock()
            .await
            .transactions
            .extend(created.iter().cloned());
        Ok(created)
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        let mut data = self.data.lock().await;
        let before = data.transactions.len();
        data.transactions.retain(|t| t.id != id);
        if data.transactions.len() == before {
            return Err(anyhow!("no transaction with id {}", id));
        }
        Ok(())
    }

    async fn replace_transactions(&self, new: &[NewTransaction]) -> Result<Vec<Transaction>> {
        let created: Vec<Transaction> = new.iter().map(Self::assign_id).collect();
        self.data.lock().await.transactions = created.clone();
        Ok(created)
    }
}

#[async_trait]
impl BudgetStore for MemoryConnection {
    async fn list_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self.data.lock().await.budgets.clone())
    }

    async fn update_budget(&self, budget: &Budget) -> Result<Budget> {
        let mut data = self.data.lock().await;
        let slot = data
            .budgets
            .iter_mut()
            .find(|b| b.id == budget.id)
            .ok_or_else(|| anyhow!("no budget with id {}", budget.id))?;
        *slot = budget.clone();
        Ok(budget.clone())
    }
}

#[async_trait]
impl GoalStore for MemoryConnection {
    async fn list_goals(&self) -> Result<Vec<Goal>> {
        Ok(self.data.lock().await.goals.clone())
    }

    async fn update_goal(&self, goal: &Goal) -> Result<Goal> {
        let mut data = self.data.lock().await;
        let slot = data
            .goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .ok_or_else(|| anyhow!("no goal with id {}", goal.id))?;
        *slot = goal.clone();
        Ok(goal.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::seed::seed_data;
    use crate::backend::domain::models::{Category, TransactionKind};
    use chrono::NaiveDate;

    fn new_tx(amount: f64) -> NewTransaction {
        NewTransaction {
            date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            description: "Test entry".to_string(),
            amount,
            category: Category::Food,
            kind: TransactionKind::Expense,
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let conn = MemoryConnection::new();
        let a = conn.create_transaction(&new_tx(10.0)).await.unwrap();
        let b = conn.create_transaction(&new_tx(20.0)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(conn.list_transactions().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_an_error() {
        let conn = MemoryConnection::new();
        assert!(conn.delete_transaction("missing").await.is_err());
    }

    #[tokio::test]
    async fn replace_swaps_the_whole_set() {
        let conn = MemoryConnection::with_data(seed_data());
        let replaced = conn.replace_transactions(&[new_tx(1.0)]).await.unwrap();
        assert_eq!(replaced.len(), 1);
        assert_eq!(conn.list_transactions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_budget_replaces_the_record() {
        let conn = MemoryConnection::with_data(seed_data());
        let mut budget = conn.list_budgets().await.unwrap()[0].clone();
        budget.limit = 4200.0;
        conn.update_budget(&budget).await.unwrap();
        let stored = conn.snapshot().await;
        assert_eq!(stored.budget(&budget.id).unwrap().limit, 4200.0);
    }
}
