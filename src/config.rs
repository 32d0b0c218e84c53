//! Calculator configuration
//!
//! Defaults are tuned for consumer loans with monthly installments. A JSON
//! file may override any subset of fields; missing fields keep their default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Starting periodic rate for Newton-Raphson (3% per period)
pub const DEFAULT_INITIAL_GUESS: f64 = 0.03;
/// Stop once |PV(r) - principal| falls below this (currency units)
pub const DEFAULT_TOLERANCE: f64 = 1e-7;
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
/// Rate substituted when a step lands at or below zero
pub const RATE_FLOOR: f64 = 0.001;
/// A step above this rate is treated as an overshoot
pub const RATE_RESET_TRIGGER: f64 = 1.0;
/// Rate substituted after an overshoot (50% per period)
pub const RATE_CEILING: f64 = 0.5;
/// Reference policy rate used by the benchmark comparison (12.25% a year)
pub const DEFAULT_BENCHMARK_ANNUAL_RATE: f64 = 0.1225;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid solver setting `{name}` = {value}: {reason}")]
    InvalidSolverSetting {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("benchmark annual rate must be positive, got {0}")]
    InvalidBenchmarkRate(f64),
}

/// Newton-Raphson settings and domain guards for the rate solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub rate_floor: f64,
    pub rate_reset_trigger: f64,
    pub rate_ceiling: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            rate_floor: RATE_FLOOR,
            rate_reset_trigger: RATE_RESET_TRIGGER,
            rate_ceiling: RATE_CEILING,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name: &'static str, value: f64, reason: &'static str| -> Result<(), ConfigError> {
            Err(ConfigError::InvalidSolverSetting { name, value, reason })
        };

        if !(self.initial_guess.is_finite() && self.initial_guess > 0.0) {
            return invalid("initial_guess", self.initial_guess, "must be positive");
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return invalid("tolerance", self.tolerance, "must be positive");
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations", 0.0, "must be at least 1");
        }
        if !(self.rate_floor.is_finite() && self.rate_floor > 0.0) {
            return invalid("rate_floor", self.rate_floor, "must be positive");
        }
        if !(self.rate_ceiling.is_finite() && self.rate_ceiling > self.rate_floor) {
            return invalid("rate_ceiling", self.rate_ceiling, "must exceed rate_floor");
        }
        if !(self.rate_reset_trigger.is_finite() && self.rate_reset_trigger >= self.rate_ceiling) {
            return invalid(
                "rate_reset_trigger",
                self.rate_reset_trigger,
                "must be at least rate_ceiling",
            );
        }
        Ok(())
    }
}

/// Top-level configuration for [`crate::RateCalculator`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub solver: SolverConfig,
    /// Annual reference rate as a decimal (0.1225 = 12.25%)
    pub benchmark_annual_rate: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            benchmark_annual_rate: DEFAULT_BENCHMARK_ANNUAL_RATE,
        }
    }
}

impl CalculatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver.validate()?;
        if !(self.benchmark_annual_rate.is_finite() && self.benchmark_annual_rate > 0.0) {
            return Err(ConfigError::InvalidBenchmarkRate(self.benchmark_annual_rate));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded calculator config: {:?}", config);
        Ok(config)
    }
}
