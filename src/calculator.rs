//! Validation, solve and classification in one call
//!
//! Holds the configuration once, then evaluates any number of loans with it,
//! one at a time or as a parallel batch.

use crate::benchmark::{compare_to_benchmark, BenchmarkComparison};
use crate::config::CalculatorConfig;
use crate::loan::{InvalidInputError, LoanInput, LoanQuery, LoanRecord};
use crate::rate::{classify, solve_periodic_rate, InterestReport};
use rayon::prelude::*;

/// Outcome of evaluating one loaded record
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub id: String,
    pub input: LoanInput,
    pub result: Result<InterestReport, InvalidInputError>,
}

/// Pre-configured rate calculator
///
/// # Example
/// ```
/// use loan_rate_review::{LoanInput, RateCalculator, SeverityTier};
///
/// let calculator = RateCalculator::new();
/// let report = calculator.calculate(&LoanInput::new(10_000.0, 24.0, 460.0)).unwrap();
/// assert!(report.converged);
/// assert_eq!(report.severity_tier, SeverityTier::Low);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateCalculator {
    config: CalculatorConfig,
}

impl RateCalculator {
    /// Create calculator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// Validate `input`, then solve and classify it
    pub fn calculate(&self, input: &LoanInput) -> Result<InterestReport, InvalidInputError> {
        let query = input.validate().map_err(|err| {
            log::debug!("Rejected loan input {:?}: {}", input, err);
            err
        })?;
        Ok(self.evaluate(&query))
    }

    /// Solve and classify an already validated query
    pub fn evaluate(&self, query: &LoanQuery) -> InterestReport {
        let outcome = solve_periodic_rate(query, &self.config.solver);
        if !outcome.is_converged() {
            log::warn!(
                "Rate solve did not converge for {:?}: {:?}; reporting best estimate",
                query,
                outcome
            );
        }

        let report = classify(query, &outcome);
        log::debug!(
            "Loan {:.2} x {} @ {:.2}: {:.4}% a month ({})",
            query.principal(),
            query.term_months(),
            query.installment_amount(),
            report.periodic_rate_percent,
            report.severity_tier
        );
        report
    }

    /// Evaluate many records in parallel, preserving input order
    pub fn calculate_batch(&self, records: &[LoanRecord]) -> Vec<BatchEntry> {
        records
            .par_iter()
            .map(|record| BatchEntry {
                id: record.id.clone(),
                input: record.input,
                result: self.calculate(&record.input),
            })
            .collect()
    }

    /// Compare a stated monthly rate against the configured benchmark
    pub fn compare(
        &self,
        principal: f64,
        term_months: f64,
        monthly_rate: f64,
    ) -> Result<BenchmarkComparison, InvalidInputError> {
        compare_to_benchmark(
            principal,
            term_months,
            monthly_rate,
            self.config.benchmark_annual_rate,
        )
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}
