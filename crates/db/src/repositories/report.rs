//! Report derivation: loads rows, then hands them to the pure builders in
//! `kontor_core`.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use super::ledger::{LedgerRepoError, LedgerRepository};
use super::tax::TaxRepository;
use kontor_core::cashflow::{CashFlowStatement, build_cash_flow};
use kontor_core::dashboard::{DashboardSummary, summarize};
use kontor_core::ledger::LineFilter;
use kontor_core::reports::{
    DateRange, GeneralLedgerReport, ReportError, TrialBalanceReport, build_general_ledger,
    build_trial_balance,
};
use kontor_core::tax::{DocumentStatusFilter, VatDirection, VatRegister, build_vat_register};
use kontor_shared::types::CompanyId;

/// Error types for report derivation.
#[derive(Debug, thiserror::Error)]
pub enum ReportRepoError {
    /// Invalid report request.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Loading ledger rows failed.
    #[error(transparent)]
    Ledger(#[from] LedgerRepoError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    ledger: LedgerRepository,
    tax: TaxRepository,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self {
            ledger: LedgerRepository::new(db.clone()),
            tax: TaxRepository::new(db),
        }
    }

    /// Fills in a missing bound: `to` defaults to `today`, `from` to the
    /// earliest posted entry (or `to` when the ledger is empty).
    pub async fn resolve_range(
        &self,
        company_id: CompanyId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<DateRange, ReportRepoError> {
        let to = to.unwrap_or(today);
        let from = match from {
            Some(from) => from,
            None => self
                .ledger
                .first_entry_date(company_id)
                .await?
                .map_or(to, |first| first.min(to)),
        };
        Ok(DateRange::new(from, to)?)
    }

    /// General ledger with opening balances carried from before the range.
    pub async fn general_ledger(
        &self,
        company_id: CompanyId,
        range: DateRange,
        filter: &LineFilter,
    ) -> Result<GeneralLedgerReport, ReportRepoError> {
        let accounts = self.ledger.accounts(company_id).await?;
        let lines = self.ledger.posted_lines(company_id, None, range.to).await?;
        debug!(company_id = %company_id, lines = lines.len(), "Building general ledger");
        Ok(build_general_ledger(&accounts, &lines, range, filter)?)
    }

    /// Trial balance for the range.
    pub async fn trial_balance(
        &self,
        company_id: CompanyId,
        range: DateRange,
    ) -> Result<TrialBalanceReport, ReportRepoError> {
        let accounts = self.ledger.accounts(company_id).await?;
        let lines = self
            .ledger
            .posted_lines(company_id, Some(range.from), range.to)
            .await?;
        debug!(company_id = %company_id, lines = lines.len(), "Building trial balance");
        Ok(build_trial_balance(&accounts, &lines, range))
    }

    /// Cash flow statement; history before the range feeds the opening cash.
    pub async fn cash_flow(
        &self,
        company_id: CompanyId,
        range: DateRange,
    ) -> Result<CashFlowStatement, ReportRepoError> {
        let accounts = self.ledger.accounts(company_id).await?;
        let lines = self.ledger.posted_lines(company_id, None, range.to).await?;
        debug!(company_id = %company_id, lines = lines.len(), "Building cash flow");
        Ok(build_cash_flow(&accounts, &lines, range))
    }

    /// VAT input or output register.
    pub async fn vat_register(
        &self,
        company_id: CompanyId,
        direction: VatDirection,
        range: DateRange,
        status_filter: DocumentStatusFilter,
    ) -> Result<VatRegister, ReportRepoError> {
        let accounts = self.ledger.accounts(company_id).await?;
        let lines = self
            .ledger
            .posted_lines(company_id, Some(range.from), range.to)
            .await?;

        let mut document_ids: Vec<Uuid> = lines
            .iter()
            .filter(|l| l.has_reference_type(direction.reference_type()))
            .filter_map(|l| l.reference_id)
            .collect();
        document_ids.sort_unstable();
        document_ids.dedup();

        let documents = self
            .tax
            .documents(company_id, direction, &document_ids)
            .await?;

        Ok(build_vat_register(
            direction,
            &accounts,
            &lines,
            &documents,
            range,
            status_filter,
        ))
    }

    /// Dashboard summary, unrounded.
    pub async fn dashboard(
        &self,
        company_id: CompanyId,
        range: DateRange,
    ) -> Result<DashboardSummary, ReportRepoError> {
        let accounts = self.ledger.accounts(company_id).await?;
        let lines = self
            .ledger
            .posted_lines(company_id, Some(range.from), range.to)
            .await?;
        Ok(summarize(&accounts, &lines, range))
    }
}
