//! Income/expense rebalancer: reconciles a user-edited aggregate figure
//! back into the underlying transaction set.
//!
//! Three strategies, picked from current state:
//! - a nonzero aggregate scales every row of that kind proportionally,
//!   rounding each scaled amount to the nearest whole currency unit;
//! - a zero aggregate with a positive target synthesizes a single
//!   adjustment row dated today, categorized Miscellaneous;
//! - a target of zero (or less) removes every row of that kind. Expenses
//!   follow the same rule as income; no opposite-typed correction entry is
//!   ever written (see DESIGN.md).
//!
//! The reconciled set goes to the store as one atomic bulk write; local
//! state is swapped only after the write is acknowledged.

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::backend::domain::commands::rebalance::{
    RebalanceResult, RebalanceStrategy, SetExpensesCommand, SetIncomeCommand,
};
use crate::backend::domain::ledger_service::overview;
use crate::backend::domain::models::{
    Budget, Category, FinancialData, NewTransaction, Transaction, TransactionKind,
};
use crate::backend::storage::traits::{BudgetStore, Connection, TransactionStore};

struct RebalancePlan {
    new_set: Vec<NewTransaction>,
    strategy: RebalanceStrategy,
    /// Set only when existing rows were scaled.
    scale_factor: Option<f64>,
}

fn adjustment_description(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Monthly Income",
        TransactionKind::Expense => "Expense Adjustment",
    }
}

/// Compute the reconciled transaction set. Pure; `today` only matters for
/// the synthesis branch.
fn plan(
    transactions: &[Transaction],
    kind: TransactionKind,
    target: f64,
    today: NaiveDate,
) -> RebalancePlan {
    let totals = overview(transactions);
    let current = match kind {
        TransactionKind::Income => totals.income,
        TransactionKind::Expense => totals.expenses,
    };
    let has_rows_of_kind = transactions.iter().any(|t| t.kind == kind);

    if target <= 0.0 {
        if !has_rows_of_kind {
            return RebalancePlan {
                new_set: Vec::new(),
                strategy: RebalanceStrategy::Unchanged,
                scale_factor: None,
            };
        }
        return RebalancePlan {
            new_set: transactions
                .iter()
                .filter(|t| t.kind != kind)
                .map(Transaction::to_new)
                .collect(),
            strategy: RebalanceStrategy::Cleared,
            scale_factor: None,
        };
    }

    if current == 0.0 {
        // Zero aggregate always takes the synthesis branch; the scale
        // branch would divide by it.
        let mut new_set: Vec<NewTransaction> =
            transactions.iter().map(Transaction::to_new).collect();
        new_set.push(NewTransaction {
            date: today,
            description: adjustment_description(kind).to_string(),
            amount: target,
            category: Category::Miscellaneous,
            kind,
        });
        return RebalancePlan {
            new_set,
            strategy: RebalanceStrategy::Synthesized,
            scale_factor: None,
        };
    }

    if (target - current).abs() < 1e-9 {
        return RebalancePlan {
            new_set: Vec::new(),
            strategy: RebalanceStrategy::Unchanged,
            scale_factor: None,
        };
    }

    let factor = target / current;
    let new_set = transactions
        .iter()
        .map(|t| {
            let mut new = t.to_new();
            if t.kind == kind {
                new.amount = (t.amount * factor).round();
            }
            new
        })
        .collect();
    RebalancePlan {
        new_set,
        strategy: RebalanceStrategy::Scaled,
        scale_factor: Some(factor),
    }
}

#[derive(Clone)]
pub struct RebalanceService<C: Connection> {
    transactions: C::Transactions,
    budgets: C::Budgets,
}

impl<C: Connection> RebalanceService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            transactions: connection.transaction_repository(),
            budgets: connection.budget_repository(),
        }
    }

    /// Reconcile total income to `command.target`.
    pub async fn set_income(
        &self,
        data: &mut FinancialData,
        command: SetIncomeCommand,
    ) -> Result<RebalanceResult> {
        if !command.target.is_finite() {
            return Err(anyhow!("Income target must be a finite number"));
        }
        let today = Local::now().date_naive();
        let plan = plan(
            &data.transactions,
            TransactionKind::Income,
            command.target,
            today,
        );
        let result = self
            .apply(data, TransactionKind::Income, plan.new_set, plan.strategy)
            .await?;

        if command.rescale_budgets {
            if let Some(factor) = plan.scale_factor {
                self.rescale_budgets(data, factor).await;
            }
        }
        Ok(result)
    }

    /// Reconcile total expenses to `command.target`.
    pub async fn set_expenses(
        &self,
        data: &mut FinancialData,
        command: SetExpensesCommand,
    ) -> Result<RebalanceResult> {
        if !command.target.is_finite() {
            return Err(anyhow!("Expense target must be a finite number"));
        }
        let today = Local::now().date_naive();
        let plan = plan(
            &data.transactions,
            TransactionKind::Expense,
            command.target,
            today,
        );
        self.apply(data, TransactionKind::Expense, plan.new_set, plan.strategy)
            .await
    }

    async fn apply(
        &self,
        data: &mut FinancialData,
        kind: TransactionKind,
        new_set: Vec<NewTransaction>,
        strategy: RebalanceStrategy,
    ) -> Result<RebalanceResult> {
        if strategy == RebalanceStrategy::Unchanged {
            return Ok(RebalanceResult {
                strategy,
                affected: Vec::new(),
            });
        }

        let stored = self.transactions.replace_transactions(&new_set).await?;
        data.transactions = stored;
        info!(?strategy, ?kind, "rebalanced ledger");

        let affected = data
            .transactions
            .iter()
            .filter(|t| t.kind == kind)
            .cloned()
            .collect();
        Ok(RebalanceResult { strategy, affected })
    }

    /// Scale every budget limit by the income factor. Each PUT stands
    /// alone: a failure is logged and skipped, and never rolls back the
    /// income change.
    async fn rescale_budgets(&self, data: &mut FinancialData, factor: f64) {
        let scaled: Vec<Budget> = data
            .budgets
            .iter()
            .map(|b| Budget {
                id: b.id.clone(),
                category: b.category,
                limit: (b.limit * factor).round(),
            })
            .collect();
        for budget in scaled {
            match self.budgets.update_budget(&budget).await {
                Ok(stored) => {
                    if let Some(slot) = data.budgets.iter_mut().find(|b| b.id == stored.id) {
                        *slot = stored;
                    }
                }
                Err(err) => {
                    warn!(id = %budget.id, %err, "budget rescale failed; keeping previous limit");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::seed::seed_data;
    use crate::backend::storage::memory::MemoryConnection;

    fn income_command(target: f64) -> SetIncomeCommand {
        SetIncomeCommand {
            target,
            rescale_budgets: false,
        }
    }

    async fn service_with_seed() -> (
        RebalanceService<MemoryConnection>,
        MemoryConnection,
        FinancialData,
    ) {
        let conn = MemoryConnection::with_data(seed_data());
        let service = RebalanceService::new(&conn);
        let data = conn.snapshot().await;
        (service, conn, data)
    }

    #[tokio::test]
    async fn scaling_income_hits_the_target_exactly_with_one_row() {
        let (service, conn, mut data) = service_with_seed().await;
        let result = service
            .set_income(&mut data, income_command(25000.0))
            .await
            .unwrap();
        assert_eq!(result.strategy, RebalanceStrategy::Scaled);
        assert_eq!(overview(&data.transactions).income, 25000.0);
        // Expense rows came through untouched.
        assert_eq!(overview(&data.transactions).expenses, 16350.0);
        assert_eq!(
            overview(&conn.snapshot().await.transactions).income,
            25000.0
        );
    }

    #[tokio::test]
    async fn scaling_preserves_proportions_within_rounding() {
        let mut data = seed_data();
        // A second income source, 1/4 the size of the first.
        data.transactions.push(Transaction {
            id: "t15".to_string(),
            date: data.transactions[0].date,
            description: "Tutoring".to_string(),
            amount: 5000.0,
            category: Category::Miscellaneous,
            kind: TransactionKind::Income,
        });
        let conn = MemoryConnection::with_data(data);
        let service = RebalanceService::new(&conn);
        let mut data = conn.snapshot().await;

        service
            .set_income(&mut data, income_command(30000.0))
            .await
            .unwrap();
        let incomes: Vec<f64> = data
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .collect();
        assert_eq!(incomes, vec![24000.0, 6000.0]);
    }

    #[tokio::test]
    async fn rounding_error_stays_below_one_unit_per_row() {
        let mut data = FinancialData::default();
        for (i, amount) in [100.0, 200.0, 333.0].iter().enumerate() {
            data.transactions.push(Transaction {
                id: format!("i{}", i),
                date: chrono::NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
                description: "Income source".to_string(),
                amount: *amount,
                category: Category::Miscellaneous,
                kind: TransactionKind::Income,
            });
        }
        let conn = MemoryConnection::with_data(data);
        let service = RebalanceService::new(&conn);
        let mut data = conn.snapshot().await;

        service
            .set_income(&mut data, income_command(1000.0))
            .await
            .unwrap();
        let income = overview(&data.transactions).income;
        assert!((income - 1000.0).abs() <= 1.5, "income was {}", income);
    }

    #[tokio::test]
    async fn zero_target_removes_every_income_row() {
        let (service, conn, mut data) = service_with_seed().await;
        let result = service
            .set_income(&mut data, income_command(0.0))
            .await
            .unwrap();
        assert_eq!(result.strategy, RebalanceStrategy::Cleared);
        assert_eq!(overview(&data.transactions).income, 0.0);
        assert!(data
            .transactions
            .iter()
            .all(|t| t.kind == TransactionKind::Expense));
        assert_eq!(conn.snapshot().await.transactions.len(), 13);
    }

    #[tokio::test]
    async fn zero_current_income_synthesizes_one_adjustment_row() {
        let mut seed = seed_data();
        seed.transactions.retain(|t| t.kind == TransactionKind::Expense);
        let conn = MemoryConnection::with_data(seed);
        let service = RebalanceService::new(&conn);
        let mut data = conn.snapshot().await;

        let result = service
            .set_income(&mut data, income_command(18000.0))
            .await
            .unwrap();
        assert_eq!(result.strategy, RebalanceStrategy::Synthesized);
        assert_eq!(result.affected.len(), 1);
        let adjustment = &result.affected[0];
        assert_eq!(adjustment.description, "Monthly Income");
        assert_eq!(adjustment.category, Category::Miscellaneous);
        assert_eq!(adjustment.amount, 18000.0);
        assert_eq!(overview(&data.transactions).income, 18000.0);
    }

    #[tokio::test]
    async fn matching_target_changes_nothing() {
        let (service, conn, mut data) = service_with_seed().await;
        let ids_before: Vec<String> = conn
            .snapshot()
            .await
            .transactions
            .iter()
            .map(|t| t.id.clone())
            .collect();

        let result = service
            .set_income(&mut data, income_command(20000.0))
            .await
            .unwrap();
        assert_eq!(result.strategy, RebalanceStrategy::Unchanged);

        // No write happened: ids were not reassigned.
        let ids_after: Vec<String> = conn
            .snapshot()
            .await
            .transactions
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(ids_before, ids_after);
    }

    #[tokio::test]
    async fn expenses_scale_to_the_target_within_rounding() {
        let (service, _conn, mut data) = service_with_seed().await;
        let result = service
            .set_expenses(&mut data, SetExpensesCommand { target: 10000.0 })
            .await
            .unwrap();
        assert_eq!(result.strategy, RebalanceStrategy::Scaled);
        let expenses = overview(&data.transactions).expenses;
        // 13 expense rows, each rounded to a whole unit.
        assert!((expenses - 10000.0).abs() <= 6.5, "expenses were {}", expenses);
        assert_eq!(overview(&data.transactions).income, 20000.0);
    }

    #[tokio::test]
    async fn zero_expense_target_clears_expenses_and_keeps_income() {
        let (service, _conn, mut data) = service_with_seed().await;
        let result = service
            .set_expenses(&mut data, SetExpensesCommand { target: 0.0 })
            .await
            .unwrap();
        assert_eq!(result.strategy, RebalanceStrategy::Cleared);
        let totals = overview(&data.transactions);
        assert_eq!(totals.expenses, 0.0);
        assert_eq!(totals.income, 20000.0);
        // Policy: no opposite-typed correction entry appears.
        assert!(data
            .transactions
            .iter()
            .all(|t| t.kind == TransactionKind::Income));
    }

    #[tokio::test]
    async fn budget_limits_follow_income_when_asked() {
        let (service, conn, mut data) = service_with_seed().await;
        let command = SetIncomeCommand {
            target: 40000.0,
            rescale_budgets: true,
        };
        service.set_income(&mut data, command).await.unwrap();

        let persisted = conn.snapshot().await;
        // Factor 2: the Food budget goes from 3000 to 6000.
        assert_eq!(persisted.budget("b1").unwrap().limit, 6000.0);
        assert_eq!(data.budget("b5").unwrap().limit, 17000.0);
    }

    #[tokio::test]
    async fn budgets_stay_put_by_default() {
        let (service, conn, mut data) = service_with_seed().await;
        service
            .set_income(&mut data, income_command(40000.0))
            .await
            .unwrap();
        assert_eq!(conn.snapshot().await.budget("b1").unwrap().limit, 3000.0);
    }

    #[tokio::test]
    async fn non_finite_target_is_rejected_up_front() {
        let (service, conn, mut data) = service_with_seed().await;
        let before = conn.snapshot().await;
        assert!(service
            .set_income(&mut data, income_command(f64::NAN))
            .await
            .is_err());
        assert!(service
            .set_expenses(&mut data, SetExpensesCommand { target: f64::INFINITY })
            .await
            .is_err());
        assert_eq!(conn.snapshot().await, before);
    }
}
