//! CSV bulk import.
//!
//! Expected shape: a header of exactly `date,description,amount,category,type`
//! (case-insensitive), then one transaction per row. Bad rows are skipped
//! with a reason, never fatal to the import; unknown categories coerce to
//! Miscellaneous. Valid rows go to the store in one bulk write.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use std::io::Read;
use tracing::{info, warn};

use crate::backend::domain::commands::import::{ImportResult, SkippedRow};
use crate::backend::domain::models::{
    Category, FinancialData, NewTransaction, TransactionKind,
};
use crate::backend::storage::traits::{Connection, TransactionStore};

const EXPECTED_HEADER: [&str; 5] = ["date", "description", "amount", "category", "type"];

fn parse_row(record: &csv::StringRecord) -> Result<NewTransaction, String> {
    if record.len() != 5 {
        return Err(format!("expected 5 fields, found {}", record.len()));
    }
    let date = NaiveDate::parse_from_str(record[0].trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date: {}", record[0].trim()))?;
    let description = record[1].trim().to_string();
    let amount: f64 = record[2]
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount: {}", record[2].trim()))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(format!("non-positive amount: {}", record[2].trim()));
    }
    let kind = match record[4].trim().to_lowercase().as_str() {
        "income" => TransactionKind::Income,
        "expense" => TransactionKind::Expense,
        other => return Err(format!("invalid type: {}", other)),
    };
    Ok(NewTransaction {
        date,
        description,
        amount,
        category: Category::parse_lenient(&record[3]),
        kind,
    })
}

#[derive(Clone)]
pub struct ImportService<C: Connection> {
    transactions: C::Transactions,
}

impl<C: Connection> ImportService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            transactions: connection.transaction_repository(),
        }
    }

    /// Import transactions from CSV. The whole batch persists through one
    /// bulk write; with no valid rows nothing is written at all.
    pub async fn import_csv<R: Read + Send>(
        &self,
        data: &mut FinancialData,
        input: R,
    ) -> Result<ImportResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?,
            None => return Err(anyhow!("CSV file is empty")),
        };
        let header_ok = header.len() == EXPECTED_HEADER.len()
            && header
                .iter()
                .zip(EXPECTED_HEADER)
                .all(|(got, want)| got.trim().eq_ignore_ascii_case(want));
        if !header_ok {
            return Err(anyhow!(
                "invalid CSV header; expected: {}",
                EXPECTED_HEADER.join(",")
            ));
        }

        let mut rows = Vec::new();
        let mut skipped = Vec::new();
        for (index, record) in records.enumerate() {
            let line = index + 2;
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    skipped.push(SkippedRow {
                        line,
                        reason: format!("unreadable row: {}", err),
                    });
                    continue;
                }
            };
            if record.len() == 1 && record[0].trim().is_empty() {
                continue;
            }
            match parse_row(&record) {
                Ok(row) => rows.push(row),
                Err(reason) => {
                    warn!(line, %reason, "skipping import row");
                    skipped.push(SkippedRow { line, reason });
                }
            }
        }

        let imported = if rows.is_empty() {
            Vec::new()
        } else {
            let stored = self.transactions.create_transactions_bulk(&rows).await?;
            data.transactions.extend(stored.iter().cloned());
            stored
        };
        info!(
            imported = imported.len(),
            skipped = skipped.len(),
            "finished CSV import"
        );
        Ok(ImportResult { imported, skipped })
    }
}
