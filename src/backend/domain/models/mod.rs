//! Domain models: the persisted entities, the owned state object that holds
//! them, and the ephemeral types derived from them.

pub mod advice;
pub mod budget;
pub mod category;
pub mod goal;
pub mod projection;
pub mod seed;
pub mod transaction;

pub use advice::{
    AdviceSlot, AdviceState, AllocationSlice, BudgetAllocation, ChatMessage, ChatRole,
    OutlineReport, RiskProfile,
};
pub use budget::Budget;
pub use category::Category;
pub use goal::Goal;
pub use projection::{ContributionTiming, ProjectionParams, ProjectionPoint, ProjectionSeries};
pub use transaction::{NewTransaction, Transaction, TransactionKind};

use serde::{Deserialize, Serialize};

/// The single owned financial-state object.
///
/// Every derived view (overview, spend by category, budget status, goal
/// progress) is a pure function of this struct and is recomputed after each
/// mutation, never cached across one. Services mutate it only after the
/// persistence collaborator has acknowledged the corresponding write, so it
/// always mirrors the last acknowledged persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
}

impl FinancialData {
    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn budget(&self, id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }
}
