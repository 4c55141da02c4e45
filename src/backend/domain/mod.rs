//! # Domain Module
//!
//! All business logic of the finance tracker, independent of any UI
//! framework, transport, or storage backend.
//!
//! ## Module Organization
//!
//! - **ledger_service**: transaction CRUD plus the overview and
//!   spend-by-category aggregations everything else derives from
//! - **budget_service**: spend-vs-limit evaluation and limit edits
//! - **goal_service**: savings-goal progress and whole-record edits
//! - **projection_service**: the investment growth simulator
//! - **rebalance_service**: reconciles user-edited aggregate figures back
//!   into the transaction set
//! - **import_service**: CSV bulk import
//! - **advice_service**: language-model slots, prompts, outline parsing
//! - **currency**: regional display formatting for amounts
//! - **commands**: the command/query structs services consume
//! - **models**: persisted entities and the owned `FinancialData` state
//!
//! ## Consistency Rules
//!
//! - Derived views are pure functions of `FinancialData`, recomputed on
//!   demand, never cached across a mutation.
//! - Every mutation persists through the storage collaborator first and
//!   touches the owned state only on acknowledgment.
//! - Validation failures reject the command before anything is written.

pub mod advice_service;
pub mod budget_service;
pub mod commands;
pub mod currency;
pub mod goal_service;
pub mod import_service;
pub mod ledger_service;
pub mod models;
pub mod projection_service;
pub mod rebalance_service;

pub use advice_service::{AdviceError, AdviceService};
pub use budget_service::{evaluate, evaluate_all, BudgetService, BudgetStatus};
pub use currency::format_currency;
pub use goal_service::{progress, GoalProgress, GoalService};
pub use import_service::ImportService;
pub use ledger_service::{list_view, overview, spend_by_category, LedgerService, Overview};
pub use projection_service::{suggested_monthly_contribution, ProjectionService};
pub use rebalance_service::RebalanceService;
