//! Loan inputs, validation and batch loading

mod input;
pub mod loader;

pub use input::{FieldError, InvalidInputError, LoanField, LoanInput, LoanQuery};
pub(crate) use input::{is_positive, whole_term};
pub use loader::{load_loans, load_loans_from_reader, LoanRecord};
