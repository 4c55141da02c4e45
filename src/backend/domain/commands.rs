//! Domain-level command and query types.
//!
//! These structs are the inputs and outputs of the domain services. A UI or
//! transport layer maps its own request shapes onto these; the services
//! never see anything else.

pub mod transactions {
    use chrono::NaiveDate;

    use crate::backend::domain::models::{Category, Transaction, TransactionKind};

    /// Input for creating a new transaction.
    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub date: NaiveDate,
        pub description: String,
        pub amount: f64,
        pub category: Category,
        pub kind: TransactionKind,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SortKey {
        Date,
        Description,
        Amount,
        Category,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SortDirection {
        Ascending,
        Descending,
    }

    /// Query parameters for the transaction list view: an optional
    /// case-insensitive description filter plus a sort order.
    #[derive(Debug, Clone)]
    pub struct TransactionListQuery {
        pub filter: Option<String>,
        pub sort_key: SortKey,
        pub direction: SortDirection,
    }

    impl Default for TransactionListQuery {
        fn default() -> Self {
            Self {
                filter: None,
                sort_key: SortKey::Date,
                direction: SortDirection::Descending,
            }
        }
    }

    /// Result of deleting a transaction.
    #[derive(Debug, Clone)]
    pub struct DeleteTransactionResult {
        pub deleted: Transaction,
    }
}

pub mod budgets {
    use crate::backend::domain::models::Category;

    /// Whole-record replacement of a budget, keyed by id.
    #[derive(Debug, Clone)]
    pub struct UpdateBudgetCommand {
        pub id: String,
        pub category: Category,
        pub limit: f64,
    }
}

pub mod goals {
    use chrono::NaiveDate;

    /// Whole-record replacement of a goal, keyed by id. There are no
    /// partial-field semantics; every mutable field is supplied.
    #[derive(Debug, Clone)]
    pub struct UpdateGoalCommand {
        pub id: String,
        pub name: String,
        pub target_amount: f64,
        pub current_amount: f64,
        pub deadline: NaiveDate,
    }
}

pub mod rebalance {
    use crate::backend::domain::models::Transaction;

    /// Reconcile the ledger so total income equals `target`.
    #[derive(Debug, Clone)]
    pub struct SetIncomeCommand {
        pub target: f64,
        /// Also scale budget limits by the same factor when income rows are
        /// scaled, preserving relative headroom. Off by default.
        pub rescale_budgets: bool,
    }

    /// Reconcile the ledger so total expenses equal `target`.
    #[derive(Debug, Clone)]
    pub struct SetExpensesCommand {
        pub target: f64,
    }

    /// How a rebalance changed the ledger.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RebalanceStrategy {
        /// Existing rows of the kind were scaled proportionally.
        Scaled,
        /// A single adjustment row was synthesized.
        Synthesized,
        /// Every row of the kind was removed.
        Cleared,
        /// The target already matched; nothing changed.
        Unchanged,
    }

    /// Result of a rebalance: the strategy taken and the rows now making up
    /// the adjusted kind.
    #[derive(Debug, Clone)]
    pub struct RebalanceResult {
        pub strategy: RebalanceStrategy,
        pub affected: Vec<Transaction>,
    }
}

pub mod import {
    use crate::backend::domain::models::Transaction;

    /// A rejected CSV row and why it was rejected.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SkippedRow {
        /// 1-based line number in the source file, counting the header.
        pub line: usize,
        pub reason: String,
    }

    /// Result of a bulk import: what made it in, what was skipped.
    #[derive(Debug, Clone)]
    pub struct ImportResult {
        pub imported: Vec<Transaction>,
        pub skipped: Vec<SkippedRow>,
    }
}
