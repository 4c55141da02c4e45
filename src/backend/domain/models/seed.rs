//! Demo dataset: one month of a student's finances.
//!
//! Used to seed an empty store for demos and exercised heavily by tests.

use chrono::NaiveDate;

use super::{Budget, Category, FinancialData, Goal, Transaction, TransactionKind};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn tx(
    id: &str,
    date_: NaiveDate,
    description: &str,
    amount: f64,
    category: Category,
    kind: TransactionKind,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date_,
        description: description.to_string(),
        amount,
        category,
        kind,
    }
}

/// The demo ledger: 14 transactions, 8 budgets, 3 goals.
pub fn seed_data() -> FinancialData {
    use Category::*;
    use TransactionKind::{Expense, Income};

    let transactions = vec![
        tx("t1", date(2025, 10, 1), "Monthly Allowance from Parents", 20000.0, Miscellaneous, Income),
        tx("t2", date(2025, 10, 1), "Hostel & Mess Fees", 8000.0, Bills, Expense),
        tx("t3", date(2025, 10, 2), "Final Year Project Stationery", 750.0, Stationery, Expense),
        tx("t4", date(2025, 10, 4), "Bike Fuel", 500.0, Transport, Expense),
        tx("t5", date(2025, 10, 5), "Cloud Certification Exam Fee", 2500.0, Education, Expense),
        tx("t6", date(2025, 10, 7), "Canteen Lunch with friends", 250.0, Food, Expense),
        tx("t7", date(2025, 10, 9), "Zomato Order", 400.0, Food, Expense),
        tx("t8", date(2025, 10, 11), "Movie Ticket - \"Fighter\"", 350.0, Entertainment, Expense),
        tx("t9", date(2025, 10, 12), "Myntra - T-shirt", 1200.0, Shopping, Expense),
        tx("t10", date(2025, 10, 14), "Snacks & Instant Noodles", 600.0, Groceries, Expense),
        tx("t11", date(2025, 10, 15), "Phone Recharge", 250.0, Bills, Expense),
        tx("t12", date(2025, 10, 16), "Metro Card Recharge", 600.0, Transport, Expense),
        tx("t13", date(2025, 10, 18), "New Earphones", 500.0, Shopping, Expense),
        tx("t14", date(2025, 10, 20), "Textbooks for Semester", 450.0, Stationery, Expense),
    ];

    let budget = |id: &str, category: Category, limit: f64| Budget {
        id: id.to_string(),
        category,
        limit,
    };
    let budgets = vec![
        budget("b1", Food, 3000.0),
        budget("b2", Transport, 1000.0),
        budget("b3", Entertainment, 1000.0),
        budget("b4", Shopping, 1500.0),
        budget("b5", Bills, 8500.0),
        budget("b6", Groceries, 1000.0),
        budget("b7", Stationery, 1000.0),
        budget("b8", Education, 3000.0),
    ];

    let goal = |id: &str, name: &str, target: f64, current: f64, deadline: NaiveDate| Goal {
        id: id.to_string(),
        name: name.to_string(),
        target_amount: target,
        current_amount: current,
        deadline,
    };
    let goals = vec![
        goal("g1", "New Laptop for Placements", 80000.0, 25000.0, date(2026, 3, 31)),
        goal("g2", "Goa Trip with friends", 25000.0, 5000.0, date(2026, 6, 30)),
        goal("g3", "Advanced Certification Fund", 15000.0, 7500.0, date(2025, 12, 31)),
    ];

    FinancialData {
        transactions,
        budgets,
        goals,
    }
}
