//! Extraction of the budget-allocation block a financial-outline response
//! may embed between literal sentinel markers.

use tracing::warn;

use crate::backend::domain::models::{BudgetAllocation, OutlineReport};

const START_MARKER: &str = "BUDGET_JSON_START";
const END_MARKER: &str = "BUDGET_JSON_END";

/// Split a raw outline response into displayable prose and the parsed
/// allocation.
///
/// When both markers are present the delimited block is always stripped
/// from the prose, whether or not its JSON parses; a parse failure only
/// means the allocation is absent. Without a complete marker pair the
/// prose passes through unmodified.
pub fn parse_outline(raw: &str) -> OutlineReport {
    let Some(start) = raw.find(START_MARKER) else {
        return OutlineReport {
            text: raw.trim().to_string(),
            allocation: None,
        };
    };
    let block_start = start + START_MARKER.len();
    let Some(end_rel) = raw[block_start..].find(END_MARKER) else {
        return OutlineReport {
            text: raw.trim().to_string(),
            allocation: None,
        };
    };
    let block = &raw[block_start..block_start + end_rel];
    let rest = &raw[block_start + end_rel + END_MARKER.len()..];

    let allocation: Option<BudgetAllocation> = match serde_json::from_str(block) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(%err, "outline budget block did not parse; dropping chart data");
            None
        }
    };

    let mut text = String::with_capacity(raw.len());
    text.push_str(&raw[..start]);
    text.push_str(rest);

    OutlineReport {
        text: text.trim().to_string(),
        allocation,
    }
}
