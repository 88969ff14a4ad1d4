//! Conversions from repository errors into [`AppError`].
//!
//! Store failures keep their detail in the `Database` variant; the API layer
//! logs it and shows callers a generic message.

use kontor_core::period::PeriodError;
use kontor_core::reports::ReportError;
use kontor_shared::AppError;
use sea_orm::DbErr;

use crate::repositories::{AuditRepoError, LedgerRepoError, PeriodRepoError, ReportRepoError};

impl From<PeriodRepoError> for AppError {
    fn from(err: PeriodRepoError) -> Self {
        match err {
            PeriodRepoError::Period(e) => period_error(e),
            PeriodRepoError::NotFound(_) => Self::NotFound(err.to_string()),
            PeriodRepoError::NoDates => Self::Validation(err.to_string()),
            PeriodRepoError::InvalidStatus { .. } => Self::Internal(err.to_string()),
            PeriodRepoError::Database(e) => database(&e),
        }
    }
}

fn period_error(err: PeriodError) -> AppError {
    match err {
        PeriodError::PeriodLocked { .. } => AppError::PeriodLocked(err.to_string()),
        PeriodError::InvalidRange { .. }
        | PeriodError::RangeTooLong { .. }
        | PeriodError::InvalidLockStatus(_) => AppError::Validation(err.to_string()),
        PeriodError::OwnerRequired | PeriodError::InsufficientRole(_) => {
            AppError::Forbidden(err.to_string())
        }
        PeriodError::NotLocked(_) => AppError::Conflict(err.to_string()),
    }
}

impl From<ReportRepoError> for AppError {
    fn from(err: ReportRepoError) -> Self {
        match err {
            ReportRepoError::Report(e @ ReportError::InvalidDateRange { .. }) => {
                Self::Validation(e.to_string())
            }
            ReportRepoError::Report(e @ ReportError::AccountNotFound(_)) => {
                Self::NotFound(e.to_string())
            }
            ReportRepoError::Ledger(e) => e.into(),
            ReportRepoError::Database(e) => database(&e),
        }
    }
}

impl From<LedgerRepoError> for AppError {
    fn from(err: LedgerRepoError) -> Self {
        match err {
            LedgerRepoError::InvalidAccount { .. } => Self::Internal(err.to_string()),
            LedgerRepoError::Database(e) => database(&e),
        }
    }
}

impl From<AuditRepoError> for AppError {
    fn from(err: AuditRepoError) -> Self {
        match err {
            AuditRepoError::Database(e) => database(&e),
        }
    }
}

fn database(err: &DbErr) -> AppError {
    AppError::Database(err.to_string())
}
