//! # HTTP Storage
//!
//! REST client for the persistence collaborator. One repository per entity
//! over a shared [`ApiConnection`] carrying the base URL and bearer token.

pub mod auth;
pub mod budget_repository;
pub mod connection;
pub mod goal_repository;
pub mod transaction_repository;

pub use auth::AuthUser;
pub use budget_repository::BudgetRepository;
pub use connection::{ApiConnection, ApiError};
pub use goal_repository::GoalRepository;
pub use transaction_repository::TransactionRepository;

use crate::backend::storage::traits::Connection;

impl Connection for ApiConnection {
    type Transactions = TransactionRepository;
    type Budgets = BudgetRepository;
    type Goals = GoalRepository;

    fn transaction_repository(&self) -> Self::Transactions {
        TransactionRepository::new(self.clone())
    }

    fn budget_repository(&self) -> Self::Budgets {
        BudgetRepository::new(self.clone())
    }

    fn goal_repository(&self) -> Self::Goals {
        GoalRepository::new(self.clone())
    }
}
