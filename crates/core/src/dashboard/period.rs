//! Named dashboard periods.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reports::DateRange;

/// Period selector accepted by the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardPeriod {
    /// Today only.
    Today,
    /// Monday of the current week through today.
    Week,
    /// First of the current month through today.
    #[default]
    Month,
    /// January 1st of the current year through today.
    Year,
}

impl DashboardPeriod {
    /// Parses a query value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Resolves a named period to a date range ending on `today`.
#[must_use]
pub fn resolve_range(period: DashboardPeriod, today: NaiveDate) -> DateRange {
    let from = match period {
        DashboardPeriod::Today => today,
        DashboardPeriod::Week => {
            today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
        }
        DashboardPeriod::Month => today.with_day(1).unwrap_or(today),
        DashboardPeriod::Year => today.with_ordinal(1).unwrap_or(today),
    };

    DateRange { from, to: today }
}
