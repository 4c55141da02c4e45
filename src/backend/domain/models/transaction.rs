//! Domain model for a transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Whether a transaction adds to or draws from the balance. The sign of a
/// transaction is carried here, never by a negative amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single dated income or expense record.
///
/// Immutable once created except through rebalancing or explicit delete.
/// Ids are opaque strings assigned by whichever store created the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// A transaction that has not been persisted yet, so it carries no id.
/// This is the wire shape for `POST /transactions` and the bulk endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Drop the id, e.g. to re-submit the record through a bulk write.
    pub fn to_new(&self) -> NewTransaction {
        NewTransaction {
            date: self.date,
            description: self.description.clone(),
            amount: self.amount,
            category: self.category,
            kind: self.kind,
        }
    }
}
