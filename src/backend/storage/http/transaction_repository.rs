//! Transaction repository backed by the REST collaborator.

use anyhow::Result;
use async_trait::async_trait;

use super::connection::ApiConnection;
use crate::backend::domain::models::{NewTransaction, Transaction};
use crate::backend::storage::traits::TransactionStore;

#[derive(Clone)]
pub struct TransactionRepository {
    conn: ApiConnection,
}

impl TransactionRepository {
    pub fn new(conn: ApiConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.conn.get_json("/transactions").await?)
    }

    async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        Ok(self.conn.post_json("/transactions", new).await?)
    }

    async fn create_transactions_bulk(&self, new: &[NewTransaction]) -> Result<Vec<Transaction>> {
        Ok(self.conn.post_json("/transactions/bulk", new).await?)
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        Ok(self.conn.delete(&format!("/transactions/{}", id)).await?)
    }

    async fn replace_transactions(&self, new: &[NewTransaction]) -> Result<Vec<Transaction>> {
        // The bulk endpoint is the collaborator's one atomic write; a bulk
        // upload is treated as the authoritative snapshot of the set.
        Ok(self.conn.post_json("/transactions/bulk", new).await?)
    }
}
