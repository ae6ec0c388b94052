//! Loan records, the session loan store and CSV loan book loading

mod record;
mod store;
pub mod loader;

pub use record::{LoanRecord, LoanStatus, NewLoan, MAX_RATE_PERCENT, MAX_TERM_YEARS};
pub use store::LoanStore;
pub use loader::{load_loans, load_loans_from_reader};
