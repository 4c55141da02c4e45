//! Domain model for a savings goal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A savings target with a deadline.
///
/// `current_amount` may exceed `target_amount` (an over-funded goal is
/// legitimate). Edits replace the whole record, keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_camel_case_on_the_wire() {
        let goal = Goal {
            id: "g1".to_string(),
            name: "New Laptop for Placements".to_string(),
            target_amount: 80000.0,
            current_amount: 25000.0,
            deadline: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        };
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["targetAmount"], 80000.0);
        assert_eq!(json["currentAmount"], 25000.0);
        assert_eq!(json["deadline"], "2026-03-31");
    }
}
