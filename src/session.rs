//! Per-request calculation state for interactive front ends
//!
//! Each submission runs `Idle -> Computing -> Resolved | Rejected`. A new
//! submission or a reset discards whatever the previous one produced.

use crate::calculator::RateCalculator;
use crate::loan::{InvalidInputError, LoanInput};
use crate::rate::InterestReport;

#[derive(Debug, Clone, PartialEq)]
pub enum CalculationState {
    Idle,
    Computing,
    Resolved(InterestReport),
    Rejected(InvalidInputError),
}

impl CalculationState {
    pub fn report(&self) -> Option<&InterestReport> {
        match self {
            CalculationState::Resolved(report) => Some(report),
            _ => None,
        }
    }

    pub fn rejection(&self) -> Option<&InvalidInputError> {
        match self {
            CalculationState::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// Holds the state of the most recent calculation
#[derive(Debug, Clone)]
pub struct CalculationSession {
    calculator: RateCalculator,
    state: CalculationState,
    pending: Option<LoanInput>,
}

impl CalculationSession {
    pub fn new(calculator: RateCalculator) -> Self {
        Self {
            calculator,
            state: CalculationState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> &CalculationState {
        &self.state
    }

    /// Accept `input` and enter `Computing`, discarding any previous result.
    ///
    /// Front ends that pace their feedback show the computing state between
    /// this call and [`finish`](Self::finish).
    pub fn begin(&mut self, input: LoanInput) -> &CalculationState {
        self.pending = Some(input);
        self.state = CalculationState::Computing;
        &self.state
    }

    /// Evaluate the pending input. Without one the state is left as is.
    pub fn finish(&mut self) -> &CalculationState {
        if let Some(input) = self.pending.take() {
            self.state = match self.calculator.calculate(&input) {
                Ok(report) => CalculationState::Resolved(report),
                Err(err) => CalculationState::Rejected(err),
            };
        }
        &self.state
    }

    /// Run one calculation, replacing any previous result
    pub fn submit(&mut self, input: &LoanInput) -> &CalculationState {
        self.begin(*input);
        self.finish()
    }

    /// Discard the current result and any pending input
    pub fn reset(&mut self) {
        self.pending = None;
        self.state = CalculationState::Idle;
    }
}

impl Default for CalculationSession {
    fn default() -> Self {
        Self::new(RateCalculator::new())
    }
}
