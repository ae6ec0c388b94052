//! Error types for loan book operations

use thiserror::Error;

/// Errors raised by the loan core
#[derive(Debug, Error)]
pub enum LoanError {
    /// A loan parameter failed validation; the record was not created
    #[error("Invalid loan parameter: {field} ({reason})")]
    Validation { field: &'static str, reason: String },

    /// A loan with this name already exists in the store
    #[error("Loan '{0}' already exists")]
    DuplicateName(String),

    /// No loan with this name exists in the store
    #[error("Loan '{0}' not found")]
    NotFound(String),

    /// Calendar arithmetic left the representable date range
    #[error("Date error: {0}")]
    Date(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoanError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        LoanError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate
pub type LoanResult<T> = Result<T, LoanError>;
