//! # Backend Module
//!
//! Everything below the UI: domain services, the storage seam to the
//! persistence collaborator, and the language-model seam for advice.
//!
//! ## Architecture
//!
//! ```text
//! UI layer (not part of this crate)
//!     ↓
//! Domain layer (services, pure aggregations)
//!     ↓                         ↓
//! Storage layer (REST/memory)   AI layer (language model)
//! ```
//!
//! [`AppState`] wires one service of each kind over a storage
//! [`Connection`](storage::Connection) and a
//! [`LanguageModel`](ai::LanguageModel), and owns the loaded
//! [`FinancialData`](domain::models::FinancialData) alongside the advice
//! content.

pub mod ai;
pub mod domain;
pub mod storage;

use anyhow::Result;
use tracing::info;

use crate::backend::ai::LanguageModel;
use crate::backend::domain::models::{AdviceState, FinancialData};
use crate::backend::domain::{
    AdviceService, BudgetService, GoalService, ImportService, LedgerService, ProjectionService,
    RebalanceService,
};
use crate::backend::storage::Connection;

/// Application state: all services plus the owned data they operate on.
pub struct AppState<C: Connection, M: LanguageModel> {
    pub ledger: LedgerService<C>,
    pub budgets: BudgetService<C>,
    pub goals: GoalService<C>,
    pub projections: ProjectionService,
    pub rebalance: RebalanceService<C>,
    pub import: ImportService<C>,
    pub advice: AdviceService<M>,
    pub data: FinancialData,
    pub advice_state: AdviceState,
}

impl<C: Connection, M: LanguageModel> AppState<C, M> {
    /// Build the services and pull the full dataset from the store.
    pub async fn load(connection: C, model: M) -> Result<Self> {
        let ledger = LedgerService::new(&connection);
        let budgets = BudgetService::new(&connection);
        let goals = GoalService::new(&connection);

        let data = FinancialData {
            transactions: ledger.fetch_all().await?,
            budgets: budgets.fetch_all().await?,
            goals: goals.fetch_all().await?,
        };
        info!(
            transactions = data.transactions.len(),
            budgets = data.budgets.len(),
            goals = data.goals.len(),
            "loaded financial data"
        );

        Ok(Self {
            ledger,
            budgets,
            goals,
            projections: ProjectionService::new(),
            rebalance: RebalanceService::new(&connection),
            import: ImportService::new(&connection),
            advice: AdviceService::new(model),
            data,
            advice_state: AdviceState::default(),
        })
    }

    /// Re-pull everything from the store, discarding local state.
    pub async fn refresh(&mut self) -> Result<()> {
        self.data = FinancialData {
            transactions: self.ledger.fetch_all().await?,
            budgets: self.budgets.fetch_all().await?,
            goals: self.goals.fetch_all().await?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ai::LanguageModel;
    use crate::backend::domain::models::seed::seed_data;
    use crate::backend::storage::MemoryConnection;
    use async_trait::async_trait;

    struct EchoModel;

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok("ok".to_string())
        }
    }

    #[tokio::test]
    async fn load_pulls_the_full_dataset() {
        let conn = MemoryConnection::with_data(seed_data());
        let state = AppState::load(conn, EchoModel).await.unwrap();
        assert_eq!(state.data.transactions.len(), 14);
        assert_eq!(state.data.budgets.len(), 8);
        assert_eq!(state.data.goals.len(), 3);
        assert!(state.advice_state.chat.is_empty());
    }

    #[tokio::test]
    async fn refresh_discards_local_drift() {
        let conn = MemoryConnection::with_data(seed_data());
        let mut state = AppState::load(conn, EchoModel).await.unwrap();
        state.data.transactions.clear();
        state.refresh().await.unwrap();
        assert_eq!(state.data.transactions.len(), 14);
    }
}
