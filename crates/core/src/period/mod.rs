//! Accounting period lock rules.
//!
//! This module provides the pure half of the Period Lock Guard:
//! - Period and lock status types
//! - Point and range lock evaluation over loaded periods
//! - Fail-open/fail-closed policy for lookup failures
//! - Lock/unlock transitions with role checks

pub mod error;
pub mod guard;
pub mod types;

pub use error::PeriodError;
pub use guard::{
    apply_lock, apply_unlock, assert_not_locked, check_lock, check_range_lock, lookup_failure,
    validate_range,
};
pub use types::{AccountingPeriod, LockCheckMode, LockStatus, PeriodStatus};
