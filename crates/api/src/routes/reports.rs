//! Report routes: general ledger, trial balance, cash flow and VAT registers.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, error::ApiResult, middleware::AuthUser};
use kontor_core::cashflow::CashFlowStatement;
use kontor_core::ledger::LineFilter;
use kontor_core::reports::{DateRange, GeneralLedgerReport, TrialBalanceReport};
use kontor_core::tax::{DocumentStatusFilter, VatDirection, VatRegister};
use kontor_db::ReportRepository;
use kontor_shared::types::AccountId;

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/general-ledger", get(get_general_ledger))
        .route("/reports/trial-balance", get(get_trial_balance))
        .route("/reports/cash-flow", get(get_cash_flow))
        .route("/reports/vat-input", get(get_vat_input))
        .route("/reports/vat-output", get(get_vat_output))
}

/// Optional report range. Missing `to` means today; missing `from` means the
/// start of the ledger.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    /// First day.
    pub from: Option<NaiveDate>,
    /// Last day.
    pub to: Option<NaiveDate>,
}

/// Query parameters for the general ledger.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralLedgerQuery {
    /// Only this account.
    #[serde(alias = "account_id")]
    pub account_id: Option<Uuid>,
    /// First day.
    pub from: Option<NaiveDate>,
    /// Last day.
    pub to: Option<NaiveDate>,
    /// Only lines tagged with this branch.
    #[serde(alias = "branch_id")]
    pub branch_id: Option<Uuid>,
    /// Only lines tagged with this cost center.
    #[serde(alias = "cost_center_id")]
    pub cost_center_id: Option<Uuid>,
}

/// Query parameters for the VAT registers.
#[derive(Debug, Default, Deserialize)]
pub struct VatQuery {
    /// First day.
    pub from: Option<NaiveDate>,
    /// Last day.
    pub to: Option<NaiveDate>,
    /// `all`, `paid`, `partially_paid` or `sent`.
    pub status: Option<String>,
}

/// Rejects an inverted range before touching the store.
fn check_order(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ApiResult<()> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(ApiError::validation(format!(
            "Invalid date range: from {from} is after to {to}"
        ))),
        _ => Ok(()),
    }
}

pub(crate) async fn resolve(
    repo: &ReportRepository,
    auth: &AuthUser,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> ApiResult<DateRange> {
    check_order(from, to)?;
    let today = Utc::now().date_naive();
    Ok(repo.resolve_range(auth.company_id(), from, to, today).await?)
}

/// GET /reports/general-ledger
async fn get_general_ledger(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<GeneralLedgerQuery>, QueryRejection>,
) -> ApiResult<Json<GeneralLedgerReport>> {
    let Query(query) = query?;
    let branch = auth.effective_branch(query.branch_id)?;

    let repo = ReportRepository::new((*state.db).clone());
    let range = resolve(&repo, &auth, query.from, query.to).await?;
    let filter = LineFilter::new()
        .with_account(query.account_id.map(AccountId::from_uuid))
        .with_branch(branch)
        .with_cost_center(query.cost_center_id);

    let report = repo.general_ledger(auth.company_id(), range, &filter).await?;
    info!(
        company_id = %auth.company_id(),
        accounts = report.accounts.len(),
        "General ledger generated"
    );
    Ok(Json(report))
}

/// GET /reports/trial-balance
async fn get_trial_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> ApiResult<Json<TrialBalanceReport>> {
    let Query(query) = query?;
    let repo = ReportRepository::new((*state.db).clone());
    let range = resolve(&repo, &auth, query.from, query.to).await?;

    let report = repo.trial_balance(auth.company_id(), range).await?;
    if !report.unbalanced_entries.is_empty() {
        tracing::warn!(
            company_id = %auth.company_id(),
            count = report.unbalanced_entries.len(),
            "Trial balance includes unbalanced entries"
        );
    }
    Ok(Json(report))
}

/// GET /reports/cash-flow
async fn get_cash_flow(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> ApiResult<Json<CashFlowStatement>> {
    let Query(query) = query?;
    let repo = ReportRepository::new((*state.db).clone());
    let range = resolve(&repo, &auth, query.from, query.to).await?;
    Ok(Json(repo.cash_flow(auth.company_id(), range).await?))
}

/// GET /reports/vat-input
async fn get_vat_input(
    state: State<AppState>,
    auth: AuthUser,
    query: Result<Query<VatQuery>, QueryRejection>,
) -> ApiResult<Json<VatRegister>> {
    vat_register(state, auth, query, VatDirection::Input).await
}

/// GET /reports/vat-output
async fn get_vat_output(
    state: State<AppState>,
    auth: AuthUser,
    query: Result<Query<VatQuery>, QueryRejection>,
) -> ApiResult<Json<VatRegister>> {
    vat_register(state, auth, query, VatDirection::Output).await
}

async fn vat_register(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<VatQuery>, QueryRejection>,
    direction: VatDirection,
) -> ApiResult<Json<VatRegister>> {
    let Query(query) = query?;
    let status = match query.status.as_deref() {
        None => DocumentStatusFilter::All,
        Some(raw) => DocumentStatusFilter::parse(raw).ok_or_else(|| {
            ApiError::validation(format!(
                "Invalid status '{raw}'; expected all, paid, partially_paid or sent"
            ))
        })?,
    };

    let repo = ReportRepository::new((*state.db).clone());
    let range = resolve(&repo, &auth, query.from, query.to).await?;
    Ok(Json(
        repo.vat_register(auth.company_id(), direction, range, status)
            .await?,
    ))
}
