//! Domain model for a category budget.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// A spending ceiling for one category.
///
/// By convention there is one budget per category, but nothing enforces
/// uniqueness. Budgets are seeded externally; the core only edits limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: Category,
    pub limit: f64,
}
