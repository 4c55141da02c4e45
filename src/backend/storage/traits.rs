//! # Storage Traits
//!
//! The seam between the domain layer and the persistence collaborator.
//! The real backend is a remote REST service ([`crate::backend::storage::http`]);
//! tests and offline use run against the in-memory store
//! ([`crate::backend::storage::memory`]). The domain layer works against
//! these traits and never learns which one it has.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::{Budget, Goal, NewTransaction, Transaction};

/// Transaction persistence operations.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// List every stored transaction.
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;

    /// Persist one new transaction and return it with its assigned id.
    async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction>;

    /// Persist a batch in one write and return the created records.
    async fn create_transactions_bulk(&self, new: &[NewTransaction]) -> Result<Vec<Transaction>>;

    /// Delete a transaction by id.
    async fn delete_transaction(&self, id: &str) -> Result<()>;

    /// Replace the entire transaction set in one atomic write and return
    /// the records as persisted. Used by rebalancing, which rewrites many
    /// rows but must stay a single external write.
    async fn replace_transactions(&self, new: &[NewTransaction]) -> Result<Vec<Transaction>>;
}

/// Budget persistence operations. Budgets are seeded externally; the core
/// only reads them and replaces single records.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    async fn list_budgets(&self) -> Result<Vec<Budget>>;

    /// Replace the budget with `budget.id` and return the stored record.
    async fn update_budget(&self, budget: &Budget) -> Result<Budget>;
}

/// Goal persistence operations, whole-record replace only.
#[async_trait]
pub trait GoalStore: Send + Sync {
    async fn list_goals(&self) -> Result<Vec<Goal>>;

    /// Replace the goal with `goal.id` and return the stored record.
    async fn update_goal(&self, goal: &Goal) -> Result<Goal>;
}

/// A storage connection: a factory for the per-entity repositories.
///
/// Cloning a connection is cheap and every repository created from the same
/// connection sees the same underlying store.
pub trait Connection: Send + Sync + Clone {
    type Transactions: TransactionStore;
    type Budgets: BudgetStore;
    type Goals: GoalStore;

    fn transaction_repository(&self) -> Self::Transactions;
    fn budget_repository(&self) -> Self::Budgets;
    fn goal_repository(&self) -> Self::Goals;
}
