//! Loan input records and precondition checks

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Input field a validation message is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanField {
    Principal,
    TermMonths,
    InstallmentAmount,
    /// Stated monthly rate (benchmark comparison only)
    MonthlyRate,
}

impl LoanField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanField::Principal => "principal",
            LoanField::TermMonths => "term_months",
            LoanField::InstallmentAmount => "installment_amount",
            LoanField::MonthlyRate => "monthly_rate",
        }
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single per-field validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: LoanField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: LoanField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raised before solving when one or more preconditions fail.
///
/// Carries every failing field so a form can flag all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid loan input: {}", join_messages(.errors))]
pub struct InvalidInputError {
    pub errors: Vec<FieldError>,
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl InvalidInputError {
    /// Message attached to `field`, if that field failed
    pub fn message_for(&self, field: LoanField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_field(&self, field: LoanField) -> bool {
        self.message_for(field).is_some()
    }
}

pub(crate) const MSG_PRINCIPAL: &str = "enter a valid amount";
pub(crate) const MSG_TERM: &str = "enter the number of installments";
pub(crate) const MSG_INSTALLMENT: &str = "enter the installment amount";
pub(crate) const MSG_TOTAL_NOT_ABOVE_PRINCIPAL: &str =
    "total repaid must exceed the amount borrowed";

/// Unvalidated loan figures as typed by a user or read from a file.
///
/// The term is kept as a float so that fractional terms are rejected
/// instead of silently truncated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: f64,
    pub term_months: f64,
    pub installment_amount: f64,
}

impl LoanInput {
    pub fn new(principal: f64, term_months: f64, installment_amount: f64) -> Self {
        Self {
            principal,
            term_months,
            installment_amount,
        }
    }

    /// Check every precondition and build a [`LoanQuery`].
    ///
    /// The total-repayment check only runs once all three figures are
    /// individually valid, and reports against the installment field.
    pub fn validate(&self) -> Result<LoanQuery, InvalidInputError> {
        let mut errors = Vec::new();

        let principal_ok = is_positive(self.principal);
        if !principal_ok {
            errors.push(FieldError::new(LoanField::Principal, MSG_PRINCIPAL));
        }

        let term = whole_term(self.term_months);
        if term.is_none() {
            errors.push(FieldError::new(LoanField::TermMonths, MSG_TERM));
        }

        let installment_ok = is_positive(self.installment_amount);
        if !installment_ok {
            errors.push(FieldError::new(LoanField::InstallmentAmount, MSG_INSTALLMENT));
        }

        if let (true, Some(n), true) = (principal_ok, term, installment_ok) {
            if self.installment_amount * n as f64 <= self.principal {
                errors.push(FieldError::new(
                    LoanField::InstallmentAmount,
                    MSG_TOTAL_NOT_ABOVE_PRINCIPAL,
                ));
            }
        }

        match term {
            Some(term_months) if errors.is_empty() => Ok(LoanQuery {
                principal: self.principal,
                term_months,
                installment_amount: self.installment_amount,
            }),
            _ => Err(InvalidInputError { errors }),
        }
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Positive whole number of installments that fits a `u32`
pub(crate) fn whole_term(value: f64) -> Option<u32> {
    if is_positive(value) && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// A loan that satisfies every solver precondition.
///
/// Only obtainable through [`LoanInput::validate`], so
/// `installment_amount * term_months > principal` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanQuery {
    principal: f64,
    term_months: u32,
    installment_amount: f64,
}

impl LoanQuery {
    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn installment_amount(&self) -> f64 {
        self.installment_amount
    }

    /// Sum of all installments
    pub fn total_paid(&self) -> f64 {
        self.installment_amount * self.term_months as f64
    }

    pub fn total_interest(&self) -> f64 {
        self.total_paid() - self.principal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let query = LoanInput::new(10_000.0, 12.0, 1_000.0).validate().unwrap();
        assert_eq!(query.principal(), 10_000.0);
        assert_eq!(query.term_months(), 12);
        assert_eq!(query.installment_amount(), 1_000.0);
        assert_eq!(query.total_paid(), 12_000.0);
        assert_eq!(query.total_interest(), 2_000.0);
    }

    #[test]
    fn test_each_field_rejected_independently() {
        let err = LoanInput::new(0.0, 12.0, 1_000.0).validate().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.message_for(LoanField::Principal), Some(MSG_PRINCIPAL));

        let err = LoanInput::new(10_000.0, 0.0, 1_000.0).validate().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert!(err.has_field(LoanField::TermMonths));

        let err = LoanInput::new(10_000.0, 12.0, 0.0).validate().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.message_for(LoanField::InstallmentAmount), Some(MSG_INSTALLMENT));
    }

    #[test]
    fn test_total_must_exceed_principal() {
        // Exactly equal: zero interest, no positive rate exists
        let err = LoanInput::new(12_000.0, 12.0, 1_000.0).validate().unwrap_err();
        assert_eq!(
            err.message_for(LoanField::InstallmentAmount),
            Some(MSG_TOTAL_NOT_ABOVE_PRINCIPAL)
        );

        let err = LoanInput::new(20_000.0, 12.0, 1_000.0).validate().unwrap_err();
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn test_total_check_skipped_when_a_field_is_invalid() {
        let err = LoanInput::new(-5.0, 12.0, 0.0).validate().unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.message_for(LoanField::InstallmentAmount), Some(MSG_INSTALLMENT));
    }

    #[test]
    fn test_all_fields_reported() {
        let err = LoanInput::new(0.0, -1.0, -3.0).validate().unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![LoanField::Principal, LoanField::TermMonths, LoanField::InstallmentAmount]
        );
    }

    #[test]
    fn test_fractional_and_non_finite_terms() {
        assert!(LoanInput::new(1_000.0, 12.5, 100.0).validate().is_err());
        assert!(LoanInput::new(1_000.0, f64::NAN, 100.0).validate().is_err());
        assert!(LoanInput::new(1_000.0, f64::INFINITY, 100.0).validate().is_err());
        assert!(LoanInput::new(f64::NAN, 12.0, 100.0).validate().is_err());
        assert!(LoanInput::new(1_000.0, 5e10, 100.0).validate().is_err());
    }

    #[test]
    fn test_error_display() {
        let err = LoanInput::new(0.0, 12.0, 100.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid loan input: principal: enter a valid amount");
    }
}
