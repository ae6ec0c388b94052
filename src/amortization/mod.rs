//! Amortization engine for fixed-rate, fixed-term monthly loans

mod engine;
mod schedule;

pub use engine::{monthly_payment, num_payments, period_date, periodic_rate, AmortizationEngine};
pub use schedule::{AmortizationSchedule, ScheduleRow, ScheduleSummary, CSV_HEADERS};
