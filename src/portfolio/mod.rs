//! Portfolio-level metrics over the loan book

mod metrics;

pub(crate) use metrics::blended_rate;
pub use metrics::{total_interest, total_interest_by_loan, weighted_average_rate, PortfolioSummary};
