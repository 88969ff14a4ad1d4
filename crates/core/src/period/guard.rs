//! Lock evaluation and period state transitions.

use chrono::{DateTime, NaiveDate, Utc};
use kontor_shared::types::UserId;

use super::error::PeriodError;
use super::types::{AccountingPeriod, LockCheckMode, LockStatus, PeriodStatus};
use crate::auth::MemberRole;

/// Returns the lock status of `date` given the company's periods.
///
/// A date is locked when any period covering it is locked. Periods are not
/// expected to overlap, but if they do the first locked one wins.
#[must_use]
pub fn check_lock(periods: &[AccountingPeriod], date: NaiveDate) -> LockStatus {
    periods
        .iter()
        .find(|p| p.contains_date(date) && p.is_locked())
        .map_or_else(LockStatus::unlocked, |p| LockStatus::locked_by(p, date))
}

/// Returns the status to use when the period lookup itself failed.
///
/// Reads fail open, writes fail closed.
#[must_use]
pub fn lookup_failure(mode: LockCheckMode, date: NaiveDate) -> LockStatus {
    match mode {
        LockCheckMode::Read => LockStatus::unlocked(),
        LockCheckMode::Write => LockStatus::lookup_failed(date),
    }
}

/// Fails with [`PeriodError::PeriodLocked`] if `date` is locked.
///
/// # Errors
///
/// Returns `PeriodLocked` carrying the period name when `date` falls in a
/// closed or locked period.
pub fn assert_not_locked(periods: &[AccountingPeriod], date: NaiveDate) -> Result<(), PeriodError> {
    let status = check_lock(periods, date);
    if status.locked {
        return Err(PeriodError::PeriodLocked {
            period_name: status.period_name.unwrap_or_else(|| "unknown".to_string()),
            date,
        });
    }
    Ok(())
}

/// Validates an inclusive date range and returns its length in days.
///
/// # Errors
///
/// Returns `InvalidRange` if `start > end`, or `RangeTooLong` if the range
/// covers more than `max_days` days.
pub fn validate_range(start: NaiveDate, end: NaiveDate, max_days: u32) -> Result<i64, PeriodError> {
    if start > end {
        return Err(PeriodError::InvalidRange { start, end });
    }

    let days = (end - start).num_days() + 1;
    if days > i64::from(max_days) {
        return Err(PeriodError::RangeTooLong { days, max_days });
    }

    Ok(days)
}

/// Walks every day in `[start, end]` and returns the first lock found.
///
/// # Errors
///
/// Returns an error if the range is invalid or longer than `max_days`.
pub fn check_range_lock(
    periods: &[AccountingPeriod],
    start: NaiveDate,
    end: NaiveDate,
    max_days: u32,
) -> Result<LockStatus, PeriodError> {
    validate_range(start, end, max_days)?;

    let first_locked = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| check_lock(periods, day))
        .find(|status| status.locked);

    Ok(first_locked.unwrap_or_else(LockStatus::unlocked))
}

/// Closes or locks a period on behalf of `actor`.
///
/// # Errors
///
/// Returns `InsufficientRole` unless the actor is an owner or admin, and
/// `InvalidLockStatus` if `target` is `Open`.
pub fn apply_lock(
    period: &AccountingPeriod,
    role: MemberRole,
    target: PeriodStatus,
    actor: UserId,
    now: DateTime<Utc>,
) -> Result<AccountingPeriod, PeriodError> {
    if !role.can_lock_periods() {
        return Err(PeriodError::InsufficientRole(role.to_string()));
    }
    if !target.blocks_writes() {
        return Err(PeriodError::InvalidLockStatus(target));
    }

    Ok(AccountingPeriod {
        status: target,
        is_locked: true,
        closed_by: Some(actor),
        closed_at: Some(now),
        ..period.clone()
    })
}

/// Reopens a period. Only owners may do this.
///
/// # Errors
///
/// Returns `OwnerRequired` for any other role and `NotLocked` if the period
/// is already open.
pub fn apply_unlock(
    period: &AccountingPeriod,
    role: MemberRole,
) -> Result<AccountingPeriod, PeriodError> {
    if !role.can_unlock_periods() {
        return Err(PeriodError::OwnerRequired);
    }
    if !period.is_locked() {
        return Err(PeriodError::NotLocked(period.period_name.clone()));
    }

    Ok(AccountingPeriod {
        status: PeriodStatus::Open,
        is_locked: false,
        closed_by: None,
        closed_at: None,
        ..period.clone()
    })
}
