//! Compare a stated monthly rate against a reference policy rate
//!
//! Simulates compound growth of the principal at the stated rate and at the
//! monthly equivalent of the benchmark, then flags rates far above it.

use crate::loan::{is_positive, whole_term, FieldError, InvalidInputError, LoanField};
use crate::rate::{annualize, PERIODS_PER_YEAR};
use serde::Serialize;

/// Annual rate above this multiple of the benchmark is flagged as abusive
pub const ABUSIVE_BENCHMARK_MULTIPLE: f64 = 3.0;

const MSG_RATE: &str = "enter a valid rate";

/// Result of simulating a stated rate next to the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    /// Principal grown at the stated rate over the term
    pub amount_due: f64,
    pub total_interest: f64,
    pub annual_rate_percent: f64,
    /// Interest the same principal would accrue at the benchmark rate
    pub benchmark_interest: f64,
    /// `total_interest - benchmark_interest`
    pub interest_gap: f64,
    pub percent_above_benchmark: f64,
    pub abusive: bool,
}

/// Monthly rate equivalent to an annual rate under compounding
pub fn monthly_equivalent(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / PERIODS_PER_YEAR as f64) - 1.0
}

/// Simulate `principal` at `monthly_rate` for `term_months` and compare.
///
/// `monthly_rate` and `benchmark_annual_rate` are decimals (0.025 = 2.5%).
pub fn compare_to_benchmark(
    principal: f64,
    term_months: f64,
    monthly_rate: f64,
    benchmark_annual_rate: f64,
) -> Result<BenchmarkComparison, InvalidInputError> {
    let mut errors = Vec::new();
    if !is_positive(principal) {
        errors.push(FieldError::new(LoanField::Principal, "enter a valid amount"));
    }
    let term = whole_term(term_months);
    if term.is_none() {
        errors.push(FieldError::new(LoanField::TermMonths, "enter a valid term"));
    }
    if !is_positive(monthly_rate) {
        errors.push(FieldError::new(LoanField::MonthlyRate, MSG_RATE));
    }
    let n = match term {
        Some(n) if errors.is_empty() => n as f64,
        _ => return Err(InvalidInputError { errors }),
    };

    let amount_due = principal * (1.0 + monthly_rate).powf(n);
    let total_interest = amount_due - principal;
    let annual_rate_percent = annualize(monthly_rate) * 100.0;

    let benchmark_monthly = monthly_equivalent(benchmark_annual_rate);
    let benchmark_interest = principal * (1.0 + benchmark_monthly).powf(n) - principal;
    let benchmark_percent = benchmark_annual_rate * 100.0;

    Ok(BenchmarkComparison {
        amount_due,
        total_interest,
        annual_rate_percent,
        benchmark_interest,
        interest_gap: total_interest - benchmark_interest,
        percent_above_benchmark: (annual_rate_percent - benchmark_percent) / benchmark_percent * 100.0,
        abusive: annual_rate_percent > benchmark_percent * ABUSIVE_BENCHMARK_MULTIPLE,
    })
}
