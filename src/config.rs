//! Dashboard configuration
//!
//! Holds the sensitivity grid, the schedule date convention and the export
//! location. Defaults reproduce the reference dashboard; a JSON file can
//! override any subset of fields.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{LoanError, LoanResult};
use crate::sensitivity::{grid_len, MAX_SWEEP_POINTS};

/// How schedule dates advance from the loan start date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRoll {
    /// Same day-of-month each period, clamped to the last day of shorter months
    #[default]
    SameDay,
    /// Every date is a calendar month end, starting with the start date's month
    MonthEnd,
}

/// Configuration for a dashboard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// First candidate rate of the sensitivity sweep, in percent
    pub sweep_start: f64,

    /// Exclusive upper bound of the sweep, in percent
    pub sweep_stop: f64,

    /// Distance between candidate rates, in percent
    pub sweep_step: f64,

    /// Schedule date convention
    pub date_roll: DateRoll,

    /// Directory that schedule CSV exports are written to
    pub export_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sweep_start: 0.0,
            sweep_stop: 20.0,
            sweep_step: 0.5,
            date_roll: DateRoll::SameDay,
            export_dir: PathBuf::from("."),
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> LoanResult<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LoanResult<()> {
        if !self.sweep_step.is_finite() || self.sweep_step <= 0.0 {
            return Err(LoanError::validation(
                "sweep_step",
                format!("must be positive, got {}", self.sweep_step),
            ));
        }
        if !self.sweep_start.is_finite() {
            return Err(LoanError::validation("sweep_start", "must be finite"));
        }
        if !self.sweep_stop.is_finite() {
            return Err(LoanError::validation("sweep_stop", "must be finite"));
        }
        let points = grid_len(self.sweep_start, self.sweep_stop, self.sweep_step);
        if points > MAX_SWEEP_POINTS as f64 {
            return Err(LoanError::validation(
                "sweep_step",
                format!("grid of {} points exceeds the limit of {}", points, MAX_SWEEP_POINTS),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"sweep_step": 1.0, "date_roll": "month_end"}"#).unwrap();
        assert_eq!(config.sweep_step, 1.0);
        assert_eq!(config.sweep_stop, 20.0);
        assert_eq!(config.date_roll, DateRoll::MonthEnd);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_validate_rejects_bad_step() {
        let config = DashboardConfig { sweep_step: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_names_failing_field() {
        let cases = [
            (DashboardConfig { sweep_start: f64::NAN, ..Default::default() }, "sweep_start"),
            (DashboardConfig { sweep_stop: f64::INFINITY, ..Default::default() }, "sweep_stop"),
            (DashboardConfig { sweep_step: 1e-9, ..Default::default() }, "sweep_step"),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(LoanError::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("Expected validation error on {}, got {:?}", expected, other),
            }
        }
    }
}
