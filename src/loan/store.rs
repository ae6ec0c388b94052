//! In-memory loan book for a single session

use chrono::NaiveDate;
use log::{info, warn};

use super::{LoanRecord, NewLoan};
use crate::error::{LoanError, LoanResult};

/// Owns every loan record for the lifetime of a session.
///
/// Records are never removed; closing a loan only changes its status, so
/// closed loans remain available for historical listings.
#[derive(Debug, Clone, Default)]
pub struct LoanStore {
    loans: Vec<LoanRecord>,
}

impl LoanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a new active loan
    pub fn add_loan(
        &mut self,
        name: &str,
        principal: f64,
        annual_rate_percent: f64,
        term_years: u32,
        start_date: NaiveDate,
    ) -> LoanResult<LoanRecord> {
        self.insert(NewLoan::new(name, principal, annual_rate_percent, term_years, start_date))
    }

    /// Validate and append a new active loan from prepared terms
    pub fn insert(&mut self, terms: NewLoan) -> LoanResult<LoanRecord> {
        terms.validate()?;
        if self.loans.iter().any(|l| l.name == terms.name) {
            return Err(LoanError::DuplicateName(terms.name));
        }

        let record = LoanRecord::open(terms);
        info!(
            "Added loan '{}': principal={:.2} rate={}% term={}y",
            record.name, record.principal, record.annual_rate_percent, record.term_years
        );
        self.loans.push(record.clone());
        Ok(record)
    }

    /// Close the first active loan with this name.
    ///
    /// Returns false, leaving the store untouched, when no active loan matches.
    pub fn close_loan(&mut self, name: &str) -> bool {
        match self.loans.iter_mut().find(|l| l.name == name && l.is_active()) {
            Some(loan) => {
                loan.close();
                info!("Closed loan '{}'", name);
                true
            }
            None => {
                warn!("No active loan named '{}' to close", name);
                false
            }
        }
    }

    /// All records in insertion order
    pub fn list_loans(&self) -> &[LoanRecord] {
        &self.loans
    }

    /// First record with this name, active or closed
    pub fn get(&self, name: &str) -> Option<&LoanRecord> {
        self.loans.iter().find(|l| l.name == name)
    }

    /// Like [`get`](Self::get) but reports a missing loan as an error
    pub fn require(&self, name: &str) -> LoanResult<&LoanRecord> {
        self.get(name).ok_or_else(|| LoanError::NotFound(name.to_string()))
    }

    pub fn active_loans(&self) -> impl Iterator<Item = &LoanRecord> {
        self.loans.iter().filter(|l| l.is_active())
    }

    /// Names of loans that can still be closed
    pub fn active_names(&self) -> Vec<&str> {
        self.active_loans().map(|l| l.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::LoanStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_loan_creates_active_record() {
        let mut store = LoanStore::new();
        let record = store.add_loan("Truck", 25_000.0, 6.5, 5, date(2024, 3, 15)).unwrap();

        assert_eq!(record.remaining_balance, 25_000.0);
        assert_eq!(record.status, LoanStatus::Active);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list_loans()[0], record);
    }

    #[test]
    fn test_add_loan_rejects_invalid_and_duplicate() {
        let mut store = LoanStore::new();
        assert!(matches!(
            store.add_loan("", 1_000.0, 5.0, 1, date(2024, 1, 1)),
            Err(LoanError::Validation { field: "name", .. })
        ));
        assert!(store.is_empty());

        store.add_loan("A", 1_000.0, 5.0, 1, date(2024, 1, 1)).unwrap();
        assert!(store.close_loan("A"));

        // Names stay reserved after closing
        assert!(matches!(
            store.add_loan("A", 2_000.0, 4.0, 2, date(2024, 1, 1)),
            Err(LoanError::DuplicateName(name)) if name == "A"
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_close_loan_is_idempotent() {
        let mut store = LoanStore::new();
        store.add_loan("A", 1_000.0, 10.0, 1, date(2024, 1, 1)).unwrap();
        store.add_loan("B", 3_000.0, 5.0, 1, date(2024, 1, 1)).unwrap();

        assert!(store.close_loan("A"));
        assert!(!store.close_loan("A"));
        assert!(!store.close_loan("missing"));

        let a = store.get("A").unwrap();
        assert_eq!(a.status, LoanStatus::Closed);
        assert_eq!(a.remaining_balance, 0.0);
        assert_eq!(store.active_names(), vec!["B"]);

        // Closed loans are still listed
        assert_eq!(store.list_loans().len(), 2);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut store = LoanStore::new();
        for name in ["Zeta", "Alpha", "Mid"] {
            store.add_loan(name, 500.0, 3.0, 1, date(2024, 1, 1)).unwrap();
        }
        let names: Vec<_> = store.list_loans().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_require_missing_loan() {
        let store = LoanStore::new();
        assert!(matches!(store.require("nope"), Err(LoanError::NotFound(_))));
    }
}
