//! Ledger service: transaction CRUD plus the aggregation views every other
//! component derives from.
//!
//! Aggregation is pure and recomputed on demand; nothing here caches a
//! derived figure across a mutation. Mutations persist first and touch the
//! owned state only after the store acknowledges, so the in-memory view
//! always matches the last acknowledged persisted state.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::info;

use crate::backend::domain::commands::transactions::{
    CreateTransactionCommand, DeleteTransactionResult, SortDirection, SortKey,
    TransactionListQuery,
};
use crate::backend::domain::models::{
    Category, FinancialData, NewTransaction, Transaction, TransactionKind,
};
use crate::backend::storage::traits::{Connection, TransactionStore};

/// Income, expense, and balance totals over the whole ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Overview {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

/// Single-pass totals. Empty input yields all zeros.
pub fn overview(transactions: &[Transaction]) -> Overview {
    let mut totals = Overview::default();
    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => totals.income += tx.amount,
            TransactionKind::Expense => totals.expenses += tx.amount,
        }
    }
    totals.balance = totals.income - totals.expenses;
    totals
}

/// Expense totals per category. Income rows never contribute; a category
/// with no expense rows is absent from the map.
pub fn spend_by_category(transactions: &[Transaction]) -> HashMap<Category, f64> {
    let mut spend = HashMap::new();
    for tx in transactions {
        if tx.kind == TransactionKind::Expense {
            *spend.entry(tx.category).or_insert(0.0) += tx.amount;
        }
    }
    spend
}

/// The transaction list view: optional case-insensitive description filter,
/// then sort. Derived only; the stored order is untouched.
pub fn list_view(transactions: &[Transaction], query: &TransactionListQuery) -> Vec<Transaction> {
    let mut rows: Vec<Transaction> = match &query.filter {
        Some(needle) => {
            let needle = needle.to_lowercase();
            transactions
                .iter()
                .filter(|t| t.description.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
        None => transactions.to_vec(),
    };

    rows.sort_by(|a, b| {
        let ordering = match query.sort_key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Description => a.description.to_lowercase().cmp(&b.description.to_lowercase()),
            SortKey::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
            SortKey::Category => a.category.as_str().cmp(b.category.as_str()),
        };
        match query.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows
}

/// Service for transaction reads and writes.
#[derive(Clone)]
pub struct LedgerService<C: Connection> {
    transactions: C::Transactions,
}

impl<C: Connection> LedgerService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            transactions: connection.transaction_repository(),
        }
    }

    /// Fetch the full transaction set from the store.
    pub async fn fetch_all(&self) -> Result<Vec<Transaction>> {
        self.transactions.list_transactions().await
    }

    /// Validate and persist a new transaction, then apply it locally.
    pub async fn add_transaction(
        &self,
        data: &mut FinancialData,
        command: CreateTransactionCommand,
    ) -> Result<Transaction> {
        let description = command.description.trim().to_string();
        if description.is_empty() || description.len() > 256 {
            return Err(anyhow!("Description must be between 1 and 256 characters"));
        }
        if !command.amount.is_finite() || command.amount < 0.0 {
            return Err(anyhow!("Amount must be a non-negative number"));
        }

        let new = NewTransaction {
            date: command.date,
            description,
            amount: command.amount,
            category: command.category,
            kind: command.kind,
        };
        let created = self.transactions.create_transaction(&new).await?;
        info!(id = %created.id, "created transaction");
        data.transactions.push(created.clone());
        Ok(created)
    }

    /// Delete by id. Unknown ids fail before any write is attempted.
    pub async fn delete_transaction(
        &self,
        data: &mut FinancialData,
        id: &str,
    ) -> Result<DeleteTransactionResult> {
        let deleted = data
            .transaction(id)
            .cloned()
            .ok_or_else(|| anyhow!("no transaction with id {}", id))?;
        self.transactions.delete_transaction(id).await?;
        data.transactions.retain(|t| t.id != id);
        info!(%id, "deleted transaction");
        Ok(DeleteTransactionResult { deleted })
    }
}
