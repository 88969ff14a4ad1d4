//! Period lock error types.

use chrono::NaiveDate;
use thiserror::Error;

use super::types::PeriodStatus;

/// Errors raised by the period lock guard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    /// The date falls in a closed or locked period.
    #[error("Date {date} falls in locked accounting period {period_name}")]
    PeriodLocked {
        /// Name of the locking period, or a placeholder when unknown.
        period_name: String,
        /// The rejected date.
        date: NaiveDate,
    },

    /// Start date is after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Range is longer than the configured maximum walk.
    #[error("Date range of {days} days exceeds the maximum of {max_days} days")]
    RangeTooLong {
        /// Days in the requested range.
        days: i64,
        /// Configured maximum.
        max_days: u32,
    },

    /// Only owners may reopen a period.
    #[error("Only the company owner can unlock an accounting period")]
    OwnerRequired,

    /// Caller's role cannot close or lock periods.
    #[error("Role {0} cannot lock accounting periods")]
    InsufficientRole(String),

    /// Target status is not a lock status.
    #[error("Cannot lock a period with status {0}")]
    InvalidLockStatus(PeriodStatus),

    /// Period is already open.
    #[error("Period {0} is not locked")]
    NotLocked(String),
}
