//! Amortization schedule output structures and CSV export

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::LoanResult;

/// Column headers of the exported schedule, in order
pub const CSV_HEADERS: [&str; 4] = [
    "Date",
    "Principal Payment",
    "Interest Payment",
    "Remaining Balance",
];

/// A single month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment number (1-indexed)
    pub period: u32,
    pub date: NaiveDate,
    pub principal_payment: f64,
    pub interest_payment: f64,
    /// Balance after this period's principal is repaid
    pub remaining_balance: f64,
}

/// Exported row layout; `period` is not part of the file format
#[derive(Serialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Principal Payment")]
    principal_payment: f64,
    #[serde(rename = "Interest Payment")]
    interest_payment: f64,
    #[serde(rename = "Remaining Balance")]
    remaining_balance: f64,
}

/// Complete schedule for one loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub loan_name: String,

    /// Level payment shared by every row
    pub monthly_payment: f64,

    pub rows: Vec<ScheduleRow>,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        let total_principal: f64 = self.rows.iter().map(|r| r.principal_payment).sum();
        let total_interest: f64 = self.rows.iter().map(|r| r.interest_payment).sum();

        ScheduleSummary {
            total_months: self.rows.len() as u32,
            monthly_payment: self.monthly_payment,
            total_principal,
            total_interest,
            total_paid: total_principal + total_interest,
            final_balance: self.rows.last().map(|r| r.remaining_balance).unwrap_or(0.0),
        }
    }

    /// Default export file name, `<loan>_monthly_payments.csv`
    pub fn file_name(&self) -> String {
        let safe: String = self
            .loan_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        format!("{}_monthly_payments.csv", safe)
    }

    /// Write the schedule as CSV. The header row is written even when there
    /// are no rows.
    pub fn write_csv<W: Write>(&self, writer: W) -> LoanResult<()> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(CSV_HEADERS)?;
        for row in &self.rows {
            wtr.serialize(CsvRow {
                date: row.date,
                principal_payment: row.principal_payment,
                interest_payment: row.interest_payment,
                remaining_balance: row.remaining_balance,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> LoanResult<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the schedule into `dir` under [`file_name`](Self::file_name)
    pub fn export_csv(&self, dir: &Path) -> LoanResult<PathBuf> {
        let path = dir.join(self.file_name());
        self.write_csv(File::create(&path)?)?;
        log::info!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(path)
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_months: u32,
    pub monthly_payment: f64,
    pub total_principal: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub final_balance: f64,
}
