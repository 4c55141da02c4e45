//! Spending category vocabulary.
//!
//! Categories are a closed set shared by transactions and budgets. There is
//! no referential integrity between the two: a transaction may carry a
//! category no budget covers, and its spend is simply unbudgeted. Strings
//! from outside the system (CSV import, API payloads typed by hand) coerce
//! to [`Category::Miscellaneous`] instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Transport,
    Entertainment,
    Bills,
    Shopping,
    Food,
    Health,
    Stationery,
    Education,
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Groceries,
        Category::Transport,
        Category::Entertainment,
        Category::Bills,
        Category::Shopping,
        Category::Food,
        Category::Health,
        Category::Stationery,
        Category::Education,
        Category::Miscellaneous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Food => "Food",
            Category::Health => "Health",
            Category::Stationery => "Stationery",
            Category::Education => "Education",
            Category::Miscellaneous => "Miscellaneous",
        }
    }

    /// Parse a category name, coercing anything unrecognized to
    /// `Miscellaneous`. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    pub fn parse_lenient(raw: &str) -> Category {
        let needle = raw.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .unwrap_or(Category::Miscellaneous)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
