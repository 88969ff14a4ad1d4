//! Chart of accounts and journal line types shared by every report.
//!
//! Reports never read the store directly: the repository layer loads
//! [`Account`] and [`LedgerLine`] rows and hands them to the pure
//! derivation functions in `reports`, `cashflow`, `tax` and `dashboard`.

pub mod filter;
pub mod integrity;
pub mod types;

pub use filter::LineFilter;
pub use integrity::{UnbalancedEntry, find_unbalanced_entries};
pub use types::{Account, AccountType, EntryStatus, LedgerLine, NormalBalance};
