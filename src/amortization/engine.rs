//! Fixed-rate, fixed-term amortization with monthly compounding

use chrono::{Datelike, Months, NaiveDate};
use log::debug;

use super::schedule::{AmortizationSchedule, ScheduleRow};
use crate::config::DateRoll;
use crate::error::{LoanError, LoanResult};
use crate::loan::LoanRecord;

/// Monthly periodic rate as a decimal (12% annual -> 0.01)
pub fn periodic_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Number of monthly payments over the term
pub fn num_payments(term_years: u32) -> u32 {
    term_years * 12
}

/// Level monthly payment that fully amortizes `principal` over the term.
///
/// Uses the annuity formula `P * r / (1 - (1 + r)^-n)`; a zero rate falls
/// back to straight-line repayment `P / n`.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let r = periodic_rate(annual_rate_percent);
    let n = num_payments(term_years);
    if n == 0 {
        return 0.0;
    }
    if r == 0.0 {
        return principal / n as f64;
    }
    principal * r / (1.0 - (1.0 + r).powi(-(n as i32)))
}

/// Date of the `period`-th payment (0-indexed) under the given convention
pub fn period_date(start: NaiveDate, period: u32, roll: DateRoll) -> LoanResult<NaiveDate> {
    let stepped = match roll {
        // Always step from the start date so a 31st doesn't decay to the 28th
        DateRoll::SameDay => start.checked_add_months(Months::new(period)),
        DateRoll::MonthEnd => start
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(period + 1)))
            .and_then(|next_first| next_first.pred_opt()),
    };
    stepped.ok_or_else(|| {
        LoanError::Date(format!("cannot step {} months from {}", period, start))
    })
}

/// Principal still owed after `paid` of `n` level payments at periodic rate `r`
fn outstanding_balance(principal: f64, r: f64, n: u32, paid: u32) -> f64 {
    if paid >= n {
        return 0.0;
    }
    if r == 0.0 {
        return principal * (n - paid) as f64 / n as f64;
    }
    let growth = (1.0 + r).powi(n as i32);
    principal * (growth - (1.0 + r).powi(paid as i32)) / (growth - 1.0)
}

/// Generates amortization schedules from a loan's contract terms
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationEngine {
    date_roll: DateRoll,
}

impl AmortizationEngine {
    pub fn new(date_roll: DateRoll) -> Self {
        Self { date_roll }
    }

    pub fn date_roll(&self) -> DateRoll {
        self.date_roll
    }

    /// Build the month-by-month schedule for a loan.
    ///
    /// The schedule always reflects the original contract terms; the record's
    /// live `remaining_balance` and `status` are not consulted. Balances come
    /// from the closed-form outstanding principal, so rounding error does not
    /// compound across periods and the last row lands on zero.
    pub fn generate_schedule(&self, loan: &LoanRecord) -> LoanResult<AmortizationSchedule> {
        let r = periodic_rate(loan.annual_rate_percent);
        let n = num_payments(loan.term_years);
        let payment = monthly_payment(loan.principal, loan.annual_rate_percent, loan.term_years);

        let mut rows = Vec::with_capacity(n as usize);
        let mut balance = loan.principal;

        for period in 0..n {
            let interest_payment = balance * r;
            let principal_payment = payment - interest_payment;
            balance = outstanding_balance(loan.principal, r, n, period + 1);

            rows.push(ScheduleRow {
                period: period + 1,
                date: period_date(loan.start_date, period, self.date_roll)?,
                principal_payment,
                interest_payment,
                remaining_balance: balance,
            });
        }

        debug!(
            "Generated {} periods for '{}' (payment={:.4}, residual={:.3e})",
            rows.len(),
            loan.name,
            payment,
            balance
        );

        Ok(AmortizationSchedule {
            loan_name: loan.name.clone(),
            monthly_payment: payment,
            rows,
        })
    }
}
