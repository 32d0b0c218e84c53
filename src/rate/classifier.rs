//! Severity classification and the derived interest report

use super::solver::SolveOutcome;
use crate::loan::LoanQuery;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monthly rate (in percent) at or below which a loan is considered acceptable
pub const LOW_TIER_MAX_PERCENT: f64 = 3.0;
/// Monthly rate (in percent) above which a loan is considered excessive
pub const MEDIUM_TIER_MAX_PERCENT: f64 = 6.0;

/// Periods per year used to annualize the periodic rate
pub const PERIODS_PER_YEAR: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    /// Classify a periodic rate given in percent (2.5 for 2.5%)
    pub fn from_periodic_percent(percent: f64) -> Self {
        if percent <= LOW_TIER_MAX_PERCENT {
            SeverityTier::Low
        } else if percent <= MEDIUM_TIER_MAX_PERCENT {
            SeverityTier::Medium
        } else {
            SeverityTier::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Low => "low",
            SeverityTier::Medium => "medium",
            SeverityTier::High => "high",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            SeverityTier::Low => "RATE WITHIN EXPECTED RANGE",
            SeverityTier::Medium => "KEEP AN EYE ON YOUR RATE",
            SeverityTier::High => "RATE TOO HIGH!",
        }
    }

    pub fn description(&self) -> String {
        match self {
            SeverityTier::Low => {
                format!("Your rate is at or below {}% a month.", LOW_TIER_MAX_PERCENT)
            }
            SeverityTier::Medium => format!(
                "Your rate is between {}% and {}% a month.",
                LOW_TIER_MAX_PERCENT, MEDIUM_TIER_MAX_PERCENT
            ),
            SeverityTier::High => {
                format!("Your rate is above {}% a month.", MEDIUM_TIER_MAX_PERCENT)
            }
        }
    }

    /// Whether the display layer should offer a professional review
    pub fn warrants_review(&self) -> bool {
        matches!(self, SeverityTier::High)
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compound a periodic rate over a year; decimal in, decimal out
pub fn annualize(periodic_rate: f64) -> f64 {
    (1.0 + periodic_rate).powi(PERIODS_PER_YEAR) - 1.0
}

/// Everything the display layer needs about one calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterestReport {
    pub periodic_rate_percent: f64,
    pub annual_rate_percent: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub severity_tier: SeverityTier,
    /// False when the solver stopped before meeting its tolerance
    pub converged: bool,
    pub iterations: u32,
}

/// Turn a solved rate into a full report for `query`
pub fn classify(query: &LoanQuery, outcome: &SolveOutcome) -> InterestReport {
    let rate = outcome.rate();
    let periodic_rate_percent = rate * 100.0;
    let total_paid = query.total_paid();

    InterestReport {
        periodic_rate_percent,
        annual_rate_percent: annualize(rate) * 100.0,
        total_interest: query.total_interest(),
        total_paid,
        severity_tier: SeverityTier::from_periodic_percent(periodic_rate_percent),
        converged: outcome.is_converged(),
        iterations: outcome.iterations(),
    }
}
