//! Loan Intelligence - loan book tracking and financing cost analytics
//!
//! This library provides:
//! - An in-memory loan store with add/close lifecycle
//! - Fixed-rate amortization schedules with CSV export
//! - Balance-weighted blended cost of debt (WACC) and total interest
//! - Sensitivity of the blended rate to a flat rate across the book

pub mod amortization;
pub mod config;
pub mod error;
pub mod loan;
pub mod portfolio;
pub mod sensitivity;

// Re-export commonly used types
pub use amortization::{monthly_payment, AmortizationEngine, AmortizationSchedule, ScheduleRow};
pub use config::{DashboardConfig, DateRoll};
pub use error::{LoanError, LoanResult};
pub use loan::{LoanRecord, LoanStatus, LoanStore, NewLoan};
pub use portfolio::{total_interest, weighted_average_rate, PortfolioSummary};
pub use sensitivity::{SensitivityAnalyzer, SensitivityPoint};
