//! Rate inference and classification

mod classifier;
mod solver;

pub use classifier::{
    annualize, classify, InterestReport, SeverityTier, LOW_TIER_MAX_PERCENT,
    MEDIUM_TIER_MAX_PERCENT, PERIODS_PER_YEAR,
};
pub use solver::{solve_periodic_rate, SolveOutcome};
