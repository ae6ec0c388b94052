//! Sensitivity of the blended rate to a flat rate across the book
//!
//! Captures the active balances once, then evaluates any number of candidate
//! rates against that snapshot. Every active loan takes the candidate rate;
//! balances are unchanged.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::loan::LoanRecord;
use crate::portfolio::blended_rate;

/// One point on the sensitivity curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Candidate rate applied to every active loan, in percent
    pub rate: f64,
    /// Resulting weighted average rate, in percent
    pub wacc: f64,
}

/// Largest number of candidate rates a single sweep evaluates
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Number of points `rate_grid` would produce, before the cap
pub fn grid_len(start: f64, stop: f64, step: f64) -> f64 {
    if step.is_nan() || step <= 0.0 || !start.is_finite() || !stop.is_finite() || stop <= start {
        return 0.0;
    }
    ((stop - start) / step).ceil()
}

/// Evenly spaced rates from `start` up to, but excluding, `stop`.
///
/// At most [`MAX_SWEEP_POINTS`] rates are returned.
pub fn rate_grid(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let count = grid_len(start, stop, step).min(MAX_SWEEP_POINTS as f64) as usize;
    // Multiply rather than accumulate to keep grid points exact
    (0..count)
        .map(|i| start + step * i as f64)
        .take_while(|&rate| rate < stop)
        .collect()
}

/// Pre-captured active balances for repeated sweeps
#[derive(Debug, Clone)]
pub struct SensitivityAnalyzer {
    balances: Vec<f64>,
}

impl SensitivityAnalyzer {
    /// Snapshot the active loans of a book
    pub fn new(records: &[LoanRecord]) -> Self {
        Self {
            balances: records
                .iter()
                .filter(|l| l.is_active())
                .map(|l| l.remaining_balance)
                .collect(),
        }
    }

    /// Blended rate if every active loan carried `rate`
    pub fn wacc_at(&self, rate: f64) -> f64 {
        blended_rate(self.balances.iter().map(|&balance| (rate, balance)))
    }

    /// Evaluate each candidate rate, preserving input order
    pub fn sweep(&self, rate_values: &[f64]) -> Vec<SensitivityPoint> {
        rate_values
            .par_iter()
            .map(|&rate| SensitivityPoint {
                rate,
                wacc: self.wacc_at(rate),
            })
            .collect()
    }

    /// Sweep the grid described by the configuration
    pub fn sweep_config(&self, config: &DashboardConfig) -> Vec<SensitivityPoint> {
        self.sweep(&rate_grid(config.sweep_start, config.sweep_stop, config.sweep_step))
    }
}

/// Convenience wrapper: snapshot `records` and sweep `rate_values`
pub fn sweep(records: &[LoanRecord], rate_values: &[f64]) -> Vec<SensitivityPoint> {
    SensitivityAnalyzer::new(records).sweep(rate_values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::LoanStore;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_reference_grid() {
        let grid = rate_grid(0.0, 20.0, 0.5);
        assert_eq!(grid.len(), 40);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[39], 19.5);
        assert!(rate_grid(0.0, 1.0, 0.0).is_empty());
        assert!(rate_grid(5.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_grid_is_capped() {
        assert!(grid_len(0.0, 20.0, 1e-9) > MAX_SWEEP_POINTS as f64);
        let grid = rate_grid(0.0, 20.0, 1e-9);
        assert_eq!(grid.len(), MAX_SWEEP_POINTS);
        assert_eq!(grid_len(0.0, 20.0, 0.5), 40.0);
        assert_eq!(grid_len(0.0, 1.0, 0.3), 4.0);
        assert_eq!(rate_grid(0.0, 1.0, 0.3).len(), 4);
    }

    #[test]
    fn test_single_loan_curve_is_identity() {
        let mut store = LoanStore::new();
        store.add_loan("A", 8_000.0, 7.0, 4, start()).unwrap();

        let curve = sweep(store.list_loans(), &[0.0, 10.0, 20.0]);
        let expected = [(0.0, 0.0), (10.0, 10.0), (20.0, 20.0)];
        assert_eq!(curve.len(), 3);
        for (point, (rate, wacc)) in curve.iter().zip(expected) {
            assert_eq!(point.rate, rate);
            assert_eq!(point.wacc, wacc);
        }
    }

    #[test]
    fn test_sweep_ignores_closed_and_own_rates() {
        let mut store = LoanStore::new();
        store.add_loan("A", 1_000.0, 10.0, 1, start()).unwrap();
        store.add_loan("B", 3_000.0, 5.0, 1, start()).unwrap();
        store.add_loan("C", 50_000.0, 30.0, 1, start()).unwrap();
        store.close_loan("C");

        let analyzer = SensitivityAnalyzer::new(store.list_loans());
        for point in analyzer.sweep(&rate_grid(0.0, 20.0, 0.5)) {
            assert_abs_diff_eq!(point.wacc, point.rate, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sweep_empty_book_is_flat_zero() {
        let curve = sweep(&[], &[1.0, 2.0]);
        assert!(curve.iter().all(|p| p.wacc == 0.0));
    }

    #[test]
    fn test_sweep_is_repeatable_and_ordered() {
        let mut store = LoanStore::new();
        store.add_loan("A", 2_500.0, 3.0, 2, start()).unwrap();
        let analyzer = SensitivityAnalyzer::new(store.list_loans());

        let rates = [15.0, 0.5, 7.25];
        let first = analyzer.sweep(&rates);
        let second = analyzer.sweep(&rates);
        assert_eq!(first, second);
        let order: Vec<f64> = first.iter().map(|p| p.rate).collect();
        assert_eq!(order, rates);
    }

    #[test]
    fn test_sweep_config_uses_grid() {
        let mut store = LoanStore::new();
        store.add_loan("A", 1_000.0, 3.0, 2, start()).unwrap();
        let config = DashboardConfig { sweep_stop: 2.0, sweep_step: 1.0, ..Default::default() };

        let curve = SensitivityAnalyzer::new(store.list_loans()).sweep_config(&config);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[1].rate, 1.0);
    }
}
