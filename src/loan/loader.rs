//! Load batches of loan inputs from CSV

use super::LoanInput;
use crate::error::Result;
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Raw CSV row. `id` is optional; rows without one are numbered from 1.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    principal: f64,
    term_months: f64,
    installment_amount: f64,
}

/// A loan input tagged with the identifier it was loaded under
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRecord {
    pub id: String,
    pub input: LoanInput,
}

impl CsvRow {
    fn into_record(self, line: usize) -> LoanRecord {
        LoanRecord {
            id: self.id.filter(|s| !s.is_empty()).unwrap_or_else(|| line.to_string()),
            input: LoanInput::new(self.principal, self.term_months, self.installment_amount),
        }
    }
}

/// Load all loan records from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<LoanRecord>> {
    let file = std::fs::File::open(path)?;
    load_loans_from_reader(file)
}

/// Load loan records from any reader (e.g., string buffer, stdin)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        records.push(row.into_record(i + 1));
    }

    Ok(records)
}
