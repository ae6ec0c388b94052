//! Load a loan book from CSV

use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

use super::{LoanStatus, LoanStore, NewLoan};
use crate::error::{LoanError, LoanResult};

/// Raw CSV row matching the loan table columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Rate")]
    rate: f64,
    #[serde(rename = "Term (Years)")]
    term_years: u32,
    #[serde(rename = "Start Date")]
    start_date: NaiveDate,
    #[serde(rename = "Status", default)]
    status: Option<String>,
}

impl CsvRow {
    fn status(&self) -> LoanResult<LoanStatus> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("Active") => Ok(LoanStatus::Active),
            Some("Closed") => Ok(LoanStatus::Closed),
            Some(other) => Err(LoanError::validation(
                "status",
                format!("unknown status '{}' for loan '{}'", other, self.name),
            )),
        }
    }
}

/// Load all loans from a CSV file into a fresh store
pub fn load_loans<P: AsRef<Path>>(path: P) -> LoanResult<LoanStore> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load loans from any reader (e.g., string buffer, stdin)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> LoanResult<LoanStore> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> LoanResult<LoanStore> {
    let mut store = LoanStore::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let status = row.status()?;
        let name = row.name.clone();

        // Every row goes through the same validation as interactive entry
        store.insert(NewLoan::new(
            row.name,
            row.principal,
            row.rate,
            row.term_years,
            row.start_date,
        ))?;

        if status == LoanStatus::Closed {
            store.close_loan(&name);
        }
    }

    log::debug!("Loaded {} loans ({} active)", store.len(), store.active_names().len());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = "\
Name,Principal,Rate,Term (Years),Start Date,Status
Equipment,10000,12,2,2024-01-01,Active
Van,30000,5,5,2023-06-15,Closed
Line,5000,0,1,2024-02-29,
";

    #[test]
    fn test_load_loans_from_reader() {
        let store = load_loans_from_reader(BOOK.as_bytes()).expect("Failed to load loans");
        assert_eq!(store.len(), 3);

        let van = store.get("Van").unwrap();
        assert_eq!(van.status, LoanStatus::Closed);
        assert_eq!(van.remaining_balance, 0.0);

        let line = store.get("Line").unwrap();
        assert!(line.is_active());
        assert_eq!(line.start_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(store.active_names(), vec!["Equipment", "Line"]);
    }

    #[test]
    fn test_status_column_optional() {
        let csv = "Name,Principal,Rate,Term (Years),Start Date\nA,100,1,1,2024-01-01\n";
        let store = load_loans_from_reader(csv.as_bytes()).unwrap();
        assert!(store.get("A").unwrap().is_active());
    }

    #[test]
    fn test_invalid_row_rejected() {
        let csv = "Name,Principal,Rate,Term (Years),Start Date\nA,100,150,1,2024-01-01\n";
        assert!(matches!(
            load_loans_from_reader(csv.as_bytes()),
            Err(LoanError::Validation { field: "annual_rate_percent", .. })
        ));

        let csv = "Name,Principal,Rate,Term (Years),Start Date,Status\nA,100,1,1,2024-01-01,Frozen\n";
        assert!(matches!(
            load_loans_from_reader(csv.as_bytes()),
            Err(LoanError::Validation { field: "status", .. })
        ));
    }
}
