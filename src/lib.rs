//! Loan Rate Review - effective interest rate inference for installment loans
//!
//! This library provides:
//! - Validation of principal, installment count and installment amount
//! - Newton-Raphson inference of the periodic rate from the annuity identity
//! - Annualized rate, totals and a low/medium/high severity tier
//! - Comparison of a stated monthly rate against a reference policy rate
//! - Parallel batch evaluation of loans loaded from CSV

pub mod benchmark;
pub mod calculator;
pub mod config;
pub mod error;
pub mod loan;
pub mod rate;
pub mod session;

// Re-export commonly used types
pub use calculator::{BatchEntry, RateCalculator};
pub use config::{CalculatorConfig, SolverConfig};
pub use error::{Error, Result};
pub use loan::{InvalidInputError, LoanField, LoanInput, LoanQuery};
pub use rate::{InterestReport, SeverityTier, SolveOutcome};
pub use session::{CalculationSession, CalculationState};
