//! Loan Rate Review CLI
//!
//! Infers the monthly rate of an installment loan, or compares a stated
//! monthly rate against the reference policy rate.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use loan_rate_review::benchmark::BenchmarkComparison;
use loan_rate_review::{CalculatorConfig, InterestReport, InvalidInputError, LoanInput, RateCalculator};
use std::path::PathBuf;
use std::process;

/// Exit status for rejected input
const EXIT_INVALID_INPUT: i32 = 2;

#[derive(Parser)]
#[command(
    name = "loan_rate_review",
    version,
    about = "Find out the real interest rate of an installment loan"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file overriding solver settings and the benchmark rate
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer the monthly rate from amount borrowed, installments and installment amount
    Rate(RateArgs),
    /// Simulate a stated monthly rate and compare it with the benchmark
    Compare(CompareArgs),
}

#[derive(Args)]
struct RateArgs {
    /// Amount borrowed
    #[arg(long)]
    principal: f64,
    /// Number of monthly installments
    #[arg(long)]
    term: f64,
    /// Amount of each installment
    #[arg(long)]
    installment: f64,
}

#[derive(Args)]
struct CompareArgs {
    /// Amount borrowed
    #[arg(long)]
    principal: f64,
    /// Number of months
    #[arg(long)]
    term: f64,
    /// Stated monthly rate in percent (2.5 for 2.5%)
    #[arg(long)]
    monthly_rate: f64,
    /// Benchmark annual rate in percent, overriding the config
    #[arg(long)]
    benchmark: Option<f64>,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    match cli.command {
        Commands::Rate(args) => {
            let calculator = RateCalculator::with_config(config);
            let input = LoanInput::new(args.principal, args.term, args.installment);
            match calculator.calculate(&input) {
                Ok(report) => {
                    print_report(&cli.format, &input, &report)?;
                    Ok(0)
                }
                Err(err) => {
                    print_rejection(&cli.format, &err)?;
                    Ok(EXIT_INVALID_INPUT)
                }
            }
        }
        Commands::Compare(args) => {
            if let Some(pct) = args.benchmark {
                config.benchmark_annual_rate = pct / 100.0;
                config.validate().context("Invalid --benchmark")?;
            }
            let calculator = RateCalculator::with_config(config);
            match calculator.compare(args.principal, args.term, args.monthly_rate / 100.0) {
                Ok(cmp) => {
                    let benchmark_pct = calculator.config().benchmark_annual_rate * 100.0;
                    print_comparison(&cli.format, &cmp, benchmark_pct)?;
                    Ok(0)
                }
                Err(err) => {
                    print_rejection(&cli.format, &err)?;
                    Ok(EXIT_INVALID_INPUT)
                }
            }
        }
    }
}

fn print_report(format: &OutputFormat, input: &LoanInput, report: &InterestReport) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            println!(
                "Loan: {:.2} in {} installments of {:.2}",
                input.principal, input.term_months, input.installment_amount
            );
            println!();
            println!("  {}", report.severity_tier.headline());
            println!("  {}", report.severity_tier.description());
            println!();
            println!("  {:<20} {:>14.2}%", "Monthly rate", report.periodic_rate_percent);
            println!("  {:<20} {:>14.2}%", "Annual rate", report.annual_rate_percent);
            println!("  {:<20} {:>15.2}", "Total interest", report.total_interest);
            println!("  {:<20} {:>15.2}", "Total paid", report.total_paid);
            if !report.converged {
                println!();
                println!("  Note: estimate did not converge after {} iterations", report.iterations);
            }
            if report.severity_tier.warrants_review() {
                println!();
                println!("  Consider requesting a professional review of this contract.");
            }
        }
    }
    Ok(())
}

fn print_comparison(format: &OutputFormat, cmp: &BenchmarkComparison, benchmark_pct: f64) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(cmp)?),
        OutputFormat::Table => {
            if cmp.abusive {
                println!("  POTENTIALLY ABUSIVE INTEREST");
            } else {
                println!("  RATE WITHIN ACCEPTABLE RANGE");
            }
            println!();
            println!("  {:<28} {:>15.2}", "Total interest", cmp.total_interest);
            println!("  {:<28} {:>15.2}", "Amount due", cmp.amount_due);
            println!("  {:<28} {:>14.2}%", "Annual rate", cmp.annual_rate_percent);
            println!(
                "  {:<28} {:>14.2}%",
                format!("Above benchmark ({:.2}%)", benchmark_pct),
                cmp.percent_above_benchmark
            );
            println!();
            println!("  At the benchmark you would pay {:.2} in interest", cmp.benchmark_interest);
            println!("  Difference: {:.2}", cmp.interest_gap);
        }
    }
    Ok(())
}

fn print_rejection(format: &OutputFormat, err: &InvalidInputError) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({ "errors": err.errors });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => {
            eprintln!("Invalid input:");
            for field_error in &err.errors {
                eprintln!("  {:<20} {}", field_error.field.as_str(), field_error.message);
            }
        }
    }
    Ok(())
}
