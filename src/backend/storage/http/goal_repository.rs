//! Goal repository backed by the REST collaborator.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::connection::ApiConnection;
use crate::backend::domain::models::Goal;
use crate::backend::storage::traits::GoalStore;

/// `PUT /goals/{id}` takes the record without its id.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalBody<'a> {
    name: &'a str,
    target_amount: f64,
    current_amount: f64,
    deadline: NaiveDate,
}

#[derive(Clone)]
pub struct GoalRepository {
    conn: ApiConnection,
}

impl GoalRepository {
    pub fn new(conn: ApiConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl GoalStore for GoalRepository {
    async fn list_goals(&self) -> Result<Vec<Goal>> {
        Ok(self.conn.get_json("/goals").await?)
    }

    async fn update_goal(&self, goal: &Goal) -> Result<Goal> {
        let body = GoalBody {
            name: &goal.name,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            deadline: goal.deadline,
        };
        Ok(self
            .conn
            .put_json(&format!("/goals/{}", goal.id), &body)
            .await?)
    }
}
