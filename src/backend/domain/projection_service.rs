//! Investment growth projector.
//!
//! A month-by-month compounding simulation rather than a closed-form
//! annuity: contribution timing and annual contribution growth make the
//! closed forms wrong, and the simulation stays obvious. Deterministic by
//! construction; the only inputs are the parameters.

use crate::backend::domain::ledger_service::{overview, Overview};
use crate::backend::domain::models::{
    ContributionTiming, FinancialData, ProjectionParams, ProjectionPoint, ProjectionSeries,
};

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl ProjectionParams {
    /// Form input arrives unvalidated; non-finite numbers become 0 and
    /// negative horizons collapse to "no years", so the simulation always
    /// produces a finite series.
    fn sanitized(&self) -> ProjectionParams {
        ProjectionParams {
            principal: finite_or_zero(self.principal),
            monthly_contribution: finite_or_zero(self.monthly_contribution),
            annual_rate_percent: finite_or_zero(self.annual_rate_percent),
            years: self.years.max(0),
            timing: self.timing,
            annual_increase_percent: finite_or_zero(self.annual_increase_percent),
        }
    }
}

#[derive(Clone, Default)]
pub struct ProjectionService;

impl ProjectionService {
    pub fn new() -> Self {
        Self
    }

    /// Run the simulation and return the year-indexed series.
    ///
    /// Year 0 is always the untouched principal. One point is recorded at
    /// the end of every 12-month block; `years <= 0` yields only year 0.
    pub fn project(&self, params: &ProjectionParams) -> ProjectionSeries {
        let p = params.sanitized();
        let monthly_rate = p.annual_rate_percent / 100.0 / 12.0;

        let mut points = Vec::with_capacity(p.years as usize + 1);
        points.push(ProjectionPoint {
            year: 0,
            projected_value: p.principal,
            total_contributed: p.principal,
        });

        let mut value = p.principal;
        let mut contributed = p.principal;
        let mut contribution = p.monthly_contribution;

        for month in 0..p.years * 12 {
            // Contribution growth compounds once per contribution-year,
            // never monthly, and not before the first year.
            if month > 0 && month % 12 == 0 {
                contribution *= 1.0 + p.annual_increase_percent / 100.0;
            }
            match p.timing {
                ContributionTiming::Beginning => {
                    value += contribution;
                    contributed += contribution;
                    value *= 1.0 + monthly_rate;
                }
                ContributionTiming::End => {
                    value *= 1.0 + monthly_rate;
                    value += contribution;
                    contributed += contribution;
                }
            }
            if (month + 1) % 12 == 0 {
                points.push(ProjectionPoint {
                    year: (month + 1) / 12,
                    projected_value: value,
                    total_contributed: contributed,
                });
            }
        }

        ProjectionSeries {
            final_value: value,
            total_contributed: contributed,
            // Negative when returns fall short of what was paid in;
            // reported as-is.
            total_interest: value - contributed,
            points,
        }
    }

    /// Parameters pre-filled the way the investments view seeds them: the
    /// goals' saved total as principal and the monthly savings figure,
    /// rounded to the nearest thousand, as the contribution.
    pub fn default_params(&self, data: &FinancialData) -> ProjectionParams {
        let principal: f64 = data.goals.iter().map(|g| g.current_amount).sum();
        ProjectionParams {
            principal,
            monthly_contribution: suggested_monthly_contribution(&overview(&data.transactions)),
            annual_rate_percent: 10.0,
            years: 10,
            timing: ContributionTiming::End,
            annual_increase_percent: 0.0,
        }
    }
}

/// Monthly savings rounded to the nearest 1 000 when positive, else a flat
/// 5 000 starter suggestion.
pub fn suggested_monthly_contribution(totals: &Overview) -> f64 {
    let savings = totals.balance;
    if savings > 0.0 {
        (savings / 1000.0).round() * 1000.0
    } else {
        5000.0
    }
}
