//! Dashboard summary figures.
//!
//! Income statement and balance sheet snapshot for a named period, derived in
//! one pass over posted journal lines.

pub mod period;
pub mod summary;


pub use period::{DashboardPeriod, resolve_range};
pub use summary::{AccountAmount, COGS_ACCOUNT_CODE, COGS_SUB_TYPES, DashboardSummary, TOP_ACCOUNTS, summarize};
