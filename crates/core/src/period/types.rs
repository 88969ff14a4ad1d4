//! Accounting period types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use kontor_shared::types::{CompanyId, PeriodId, UserId};

/// Status of an accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for postings.
    Open,
    /// Period has been closed at month/year end.
    Closed,
    /// Period is locked, no changes allowed.
    Locked,
}

impl PeriodStatus {
    /// Parses a stored status string, case-insensitively.
    #[must_use]
    pub fn parse(status: &str) -> Option<Self> {
        match status.trim().to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "locked" => Some(Self::Locked),
            _ => None,
        }
    }

    /// Returns the canonical lowercase status name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Locked => "locked",
        }
    }

    /// Returns true for statuses that block ledger mutations.
    #[must_use]
    pub const fn blocks_writes(&self) -> bool {
        matches!(self, Self::Closed | Self::Locked)
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accounting period with an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingPeriod {
    /// Unique identifier.
    pub id: PeriodId,
    /// Company this period belongs to.
    pub company_id: CompanyId,
    /// Human-readable name (e.g., "January 2026").
    pub period_name: String,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// Lifecycle status.
    pub status: PeriodStatus,
    /// Explicit lock flag, kept alongside `status` for older rows.
    pub is_locked: bool,
    /// User who closed or locked the period.
    pub closed_by: Option<UserId>,
    /// When the period was closed or locked.
    pub closed_at: Option<DateTime<Utc>>,
}

impl AccountingPeriod {
    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }

    /// Returns true if any of the lock signals is set.
    ///
    /// `is_locked`, `status = closed` and `status = locked` are each
    /// sufficient on their own.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.is_locked || self.status.blocks_writes()
    }
}

/// Result of a lock lookup for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockStatus {
    /// Whether the date is locked.
    pub locked: bool,
    /// First locked date found, set only when `locked` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Name of the locking period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_name: Option<String>,
    /// Why the date is locked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl LockStatus {
    /// The date is not covered by any locked period.
    #[must_use]
    pub const fn unlocked() -> Self {
        Self {
            locked: false,
            date: None,
            period_name: None,
            reason: None,
        }
    }

    /// The date is covered by the given locked period.
    #[must_use]
    pub fn locked_by(period: &AccountingPeriod, date: NaiveDate) -> Self {
        let reason = if period.status.blocks_writes() {
            format!("Period {} is {}", period.period_name, period.status)
        } else {
            format!("Period {} is locked", period.period_name)
        };

        Self {
            locked: true,
            date: Some(date),
            period_name: Some(period.period_name.clone()),
            reason: Some(reason),
        }
    }

    /// The lock lookup failed and the caller must treat the date as locked.
    #[must_use]
    pub fn lookup_failed(date: NaiveDate) -> Self {
        Self {
            locked: true,
            date: Some(date),
            period_name: None,
            reason: Some("Period lock status could not be verified".to_string()),
        }
    }
}

/// Which kind of caller is asking for a lock check.
///
/// Read paths tolerate stale or missing lock data; write paths do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockCheckMode {
    /// Report and display paths: a failed lookup counts as unlocked.
    Read,
    /// Mutating paths: a failed lookup counts as locked.
    Write,
}
