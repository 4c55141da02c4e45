//! Types for the investment growth projector.

use serde::{Deserialize, Serialize};

/// Whether a periodic contribution is added before or after that period's
/// growth is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionTiming {
    Beginning,
    End,
}

impl Default for ContributionTiming {
    fn default() -> Self {
        ContributionTiming::End
    }
}

/// Inputs to the projection simulation.
///
/// All numeric fields come straight from user-set sliders or form entry and
/// may therefore be garbage (`NaN`, infinities); the projector sanitizes
/// them before simulating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Starting value. Defaults to the sum of all goals' saved amounts
    /// unless the user overrides it.
    pub principal: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: i32,
    pub timing: ContributionTiming,
    /// Annual growth of the contribution itself, compounded once per
    /// contribution-year, not monthly.
    pub annual_increase_percent: f64,
}

/// One point of the year-indexed projection series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: i32,
    pub projected_value: f64,
    pub total_contributed: f64,
}

/// The full simulated series plus its summary figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    /// Points for year 0 through the final year, inclusive.
    pub points: Vec<ProjectionPoint>,
    pub final_value: f64,
    pub total_contributed: f64,
    /// Growth minus contributions. Negative when the timeframe's returns
    /// fall short of what was paid in; reported as-is, never clamped.
    pub total_interest: f64,
}
