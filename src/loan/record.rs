//! Loan record data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LoanError, LoanResult};

/// Longest supported loan term in years
pub const MAX_TERM_YEARS: u32 = 30;

/// Highest accepted annual rate, in percent
pub const MAX_RATE_PERCENT: f64 = 100.0;

/// Lifecycle status of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoanStatus {
    /// Outstanding and included in portfolio aggregates
    #[default]
    Active,
    /// Paid off or written off; terminal
    Closed,
}

impl LoanStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, LoanStatus::Active)
    }

    /// Label used in tables and CSV files
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "Active",
            LoanStatus::Closed => "Closed",
        }
    }
}

/// Contract terms for a loan that has not been added to a store yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoan {
    pub name: String,
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    pub start_date: NaiveDate,
}

impl NewLoan {
    pub fn new(
        name: impl Into<String>,
        principal: f64,
        annual_rate_percent: f64,
        term_years: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            principal,
            annual_rate_percent,
            term_years,
            start_date,
        }
    }

    /// Check every field against the accepted ranges
    pub fn validate(&self) -> LoanResult<()> {
        if self.name.trim().is_empty() {
            return Err(LoanError::validation("name", "must not be empty"));
        }
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(LoanError::validation(
                "principal",
                format!("must be a positive amount, got {}", self.principal),
            ));
        }
        if !self.annual_rate_percent.is_finite()
            || !(0.0..=MAX_RATE_PERCENT).contains(&self.annual_rate_percent)
        {
            return Err(LoanError::validation(
                "annual_rate_percent",
                format!("must be within [0, {}], got {}", MAX_RATE_PERCENT, self.annual_rate_percent),
            ));
        }
        if !(1..=MAX_TERM_YEARS).contains(&self.term_years) {
            return Err(LoanError::validation(
                "term_years",
                format!("must be within [1, {}], got {}", MAX_TERM_YEARS, self.term_years),
            ));
        }
        Ok(())
    }
}

/// A single loan contract held in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Unique loan identifier
    pub name: String,

    /// Original amount borrowed
    pub principal: f64,

    /// Nominal annual rate in percent (7.5 = 7.5%)
    pub annual_rate_percent: f64,

    /// Contract term in years
    pub term_years: u32,

    /// Date of the first scheduled payment period
    pub start_date: NaiveDate,

    /// Outstanding balance used for portfolio weighting
    pub remaining_balance: f64,

    pub status: LoanStatus,
}

impl LoanRecord {
    /// Build an active record from validated terms
    pub(crate) fn open(terms: NewLoan) -> Self {
        Self {
            remaining_balance: terms.principal,
            name: terms.name,
            principal: terms.principal,
            annual_rate_percent: terms.annual_rate_percent,
            term_years: terms.term_years,
            start_date: terms.start_date,
            status: LoanStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Number of monthly payments over the full term
    pub fn num_payments(&self) -> u32 {
        self.term_years * 12
    }

    /// Transition to Closed. Returns false if the loan was already closed.
    pub(crate) fn close(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = LoanStatus::Closed;
        self.remaining_balance = 0.0;
        true
    }
}
