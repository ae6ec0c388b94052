//! Blended cost of debt and per-loan interest totals

use serde::{Deserialize, Serialize};

use crate::amortization::{monthly_payment, num_payments};
use crate::loan::LoanRecord;

/// Balance-weighted mean of `(rate, balance)` pairs.
///
/// Returns 0 when there is nothing to weight. Weights are normalized before
/// multiplying so a single position reproduces its rate exactly.
pub(crate) fn blended_rate<I>(positions: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)> + Clone,
{
    let total: f64 = positions.clone().into_iter().map(|(_, balance)| balance).sum();
    if total == 0.0 {
        return 0.0;
    }
    positions
        .into_iter()
        .map(|(rate, balance)| rate * (balance / total))
        .sum()
}

/// Weighted average cost of the active loans, in percent.
///
/// Closed loans are ignored. An empty book, or one whose active balances sum
/// to zero, yields 0 rather than NaN.
pub fn weighted_average_rate(records: &[LoanRecord]) -> f64 {
    blended_rate(
        records
            .iter()
            .filter(|l| l.is_active())
            .map(|l| (l.annual_rate_percent, l.remaining_balance)),
    )
}

/// Interest paid over the full term, `payment * n - principal`
pub fn total_interest(loan: &LoanRecord) -> f64 {
    if loan.annual_rate_percent == 0.0 {
        return 0.0;
    }
    let payment = monthly_payment(loan.principal, loan.annual_rate_percent, loan.term_years);
    payment * num_payments(loan.term_years) as f64 - loan.principal
}

/// Total interest for every loan, closed ones included, in store order
pub fn total_interest_by_loan(records: &[LoanRecord]) -> Vec<(String, f64)> {
    records
        .iter()
        .map(|l| (l.name.clone(), total_interest(l)))
        .collect()
}

/// Headline figures for the loan book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub loan_count: usize,
    pub active_count: usize,
    pub total_active_balance: f64,
    /// Weighted average rate of active loans, in percent
    pub wacc: f64,
}

impl PortfolioSummary {
    pub fn from_records(records: &[LoanRecord]) -> Self {
        let active = records.iter().filter(|l| l.is_active());
        Self {
            loan_count: records.len(),
            active_count: active.clone().count(),
            total_active_balance: active.map(|l| l.remaining_balance).sum(),
            wacc: weighted_average_rate(records),
        }
    }
}
