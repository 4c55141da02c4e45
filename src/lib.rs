//! # fintrack
//!
//! Core library for a personal finance tracker: an income/expense ledger,
//! category budgets, savings goals, an investment growth projector, and
//! AI-generated financial advice.
//!
//! The crate is UI-agnostic. Persistence lives behind an external REST
//! collaborator and text generation behind an external language-model
//! collaborator; both are reached through traits so the core stays testable
//! without the network.

pub mod backend;

pub use backend::domain::models::{
    Budget, Category, FinancialData, Goal, Transaction, TransactionKind,
};
pub use backend::AppState;
