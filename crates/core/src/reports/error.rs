//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;
use kontor_shared::types::AccountId;

/// Errors that can occur while deriving a report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// `from` is after `to`.
    #[error("Invalid date range: from {from} is after to {to}")]
    InvalidDateRange {
        /// Range start.
        from: NaiveDate,
        /// Range end.
        to: NaiveDate,
    },

    /// Requested account is not an active account of the company.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
}
