//! General ledger and trial balance derivation.
//!
//! Both reports are folds over posted, non-deleted journal lines. Balances are
//! reconstructed from the lines on every call; nothing is snapshotted.

pub mod error;
pub mod general_ledger;
pub mod trial_balance;
pub mod types;


pub use error::ReportError;
pub use general_ledger::build_general_ledger;
pub use trial_balance::build_trial_balance;
pub use types::{
    AccountLedger, DateRange, GeneralLedgerReport, GeneralLedgerSummary, LedgerTransaction,
    TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
