//! `SeaORM` entity definitions.

pub mod accounting_periods;
pub mod audit_logs;
pub mod bills;
pub mod chart_of_accounts;
pub mod companies;
pub mod company_members;
pub mod invoices;
pub mod journal_entries;
pub mod journal_lines;

pub mod prelude {
    //! Entity re-exports.

    pub use super::accounting_periods::Entity as AccountingPeriods;
    pub use super::audit_logs::Entity as AuditLogs;
    pub use super::bills::Entity as Bills;
    pub use super::chart_of_accounts::Entity as ChartOfAccounts;
    pub use super::companies::Entity as Companies;
    pub use super::company_members::Entity as CompanyMembers;
    pub use super::invoices::Entity as Invoices;
    pub use super::journal_entries::Entity as JournalEntries;
    pub use super::journal_lines::Entity as JournalLines;
}
