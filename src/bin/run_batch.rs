//! Evaluate every loan in a CSV file
//!
//! Input columns: `id` (optional), `principal`, `term_months`,
//! `installment_amount`. Writes one output row per input row; rejected rows
//! carry their validation message instead of figures.

use anyhow::{Context, Result};
use clap::Parser;
use loan_rate_review::loan::load_loans;
use loan_rate_review::{BatchEntry, CalculatorConfig, RateCalculator};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "run_batch", about = "Infer interest rates for a CSV of loans")]
struct Cli {
    /// Loans to evaluate
    #[arg(long, default_value = "loans.csv")]
    input: PathBuf,

    /// Where to write the report
    #[arg(long, default_value = "loan_rate_report.csv")]
    output: PathBuf,

    /// JSON file overriding solver settings
    #[arg(long)]
    config: Option<PathBuf>,
}

/// One output row; figures are empty when the input was rejected
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: &'a str,
    principal: f64,
    term_months: f64,
    installment_amount: f64,
    monthly_rate_pct: Option<f64>,
    annual_rate_pct: Option<f64>,
    total_paid: Option<f64>,
    total_interest: Option<f64>,
    severity: Option<&'static str>,
    converged: Option<bool>,
    iterations: Option<u32>,
    error: Option<String>,
}

impl<'a> From<&'a BatchEntry> for ReportRow<'a> {
    fn from(entry: &'a BatchEntry) -> Self {
        let report = entry.result.as_ref().ok();
        ReportRow {
            id: &entry.id,
            principal: entry.input.principal,
            term_months: entry.input.term_months,
            installment_amount: entry.input.installment_amount,
            monthly_rate_pct: report.map(|r| r.periodic_rate_percent),
            annual_rate_pct: report.map(|r| r.annual_rate_percent),
            total_paid: report.map(|r| r.total_paid),
            total_interest: report.map(|r| r.total_interest),
            severity: report.map(|r| r.severity_tier.as_str()),
            converged: report.map(|r| r.converged),
            iterations: report.map(|r| r.iterations),
            error: entry.result.as_ref().err().map(ToString::to_string),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CalculatorConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    let start = Instant::now();
    let records = load_loans(&cli.input)
        .with_context(|| format!("Failed to load loans from {}", cli.input.display()))?;
    log::info!("Loaded {} loans in {:?}", records.len(), start.elapsed());

    let calc_start = Instant::now();
    let calculator = RateCalculator::with_config(config);
    let entries = calculator.calculate_batch(&records);
    log::info!("Evaluated {} loans in {:?}", entries.len(), calc_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    for entry in &entries {
        writer.serialize(ReportRow::from(entry))?;
    }
    writer.flush()?;

    let rejected = entries.iter().filter(|e| e.result.is_err()).count();
    let unconverged = entries
        .iter()
        .filter_map(|e| e.result.as_ref().ok())
        .filter(|r| !r.converged)
        .count();
    let high = entries
        .iter()
        .filter_map(|e| e.result.as_ref().ok())
        .filter(|r| r.severity_tier.warrants_review())
        .count();

    println!("Output written to {}", cli.output.display());
    println!("\nBatch Summary:");
    println!("  Loans:        {}", entries.len());
    println!("  Rejected:     {}", rejected);
    println!("  High tier:    {}", high);
    println!("  Unconverged:  {}", unconverged);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
