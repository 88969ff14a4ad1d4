//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod audit;
pub mod company;
pub mod ledger;
pub mod period;
pub mod report;
pub mod tax;

pub use audit::{AuditLogFilter, AuditLogRecord, AuditRepoError, AuditRepository};
pub use company::CompanyRepository;
pub use ledger::{LedgerRepoError, LedgerRepository};
pub use period::{PeriodRepoError, PeriodRepository};
pub use report::{ReportRepoError, ReportRepository};
pub use tax::TaxRepository;
