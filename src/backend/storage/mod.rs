//! # Storage Layer
//!
//! Persistence seam for the core. [`traits`] defines what the domain layer
//! needs; [`http`] talks to the remote relational-store collaborator;
//! [`memory`] keeps everything in-process for tests and offline use.

pub mod http;
pub mod memory;
pub mod traits;

pub use http::{ApiConnection, ApiError};
pub use memory::MemoryConnection;
pub use traits::{BudgetStore, Connection, GoalStore, TransactionStore};
