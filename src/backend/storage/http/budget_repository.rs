//! Budget repository backed by the REST collaborator.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use super::connection::ApiConnection;
use crate::backend::domain::models::{Budget, Category};
use crate::backend::storage::traits::BudgetStore;

/// `PUT /budgets/{id}` takes the record without its id.
#[derive(Serialize)]
struct BudgetBody {
    category: Category,
    limit: f64,
}

#[derive(Clone)]
pub struct BudgetRepository {
    conn: ApiConnection,
}

impl BudgetRepository {
    pub fn new(conn: ApiConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl BudgetStore for BudgetRepository {
    async fn list_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self.conn.get_json("/budgets").await?)
    }

    async fn update_budget(&self, budget: &Budget) -> Result<Budget> {
        let body = BudgetBody {
            category: budget.category,
            limit: budget.limit,
        };
        Ok(self
            .conn
            .put_json(&format!("/budgets/{}", budget.id), &body)
            .await?)
    }
}
