//! Accounting period routes: listing, lock checks and lock transitions.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::PathRejection, rejection::QueryRejection},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, error::ApiResult, middleware::AuthUser};
use kontor_core::auth::MemberRole;
use kontor_core::period::{AccountingPeriod, LockCheckMode, LockStatus, PeriodStatus};
use kontor_db::{CompanyRepository, PeriodRepository};
use kontor_shared::types::PeriodId;

/// Creates the period routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/periods", get(list_periods))
        .route("/periods/check-lock", get(check_lock))
        .route("/periods/check-range-lock", get(check_range_lock))
        .route("/periods/{period_id}/lock", post(lock_period))
        .route("/periods/{period_id}/unlock", post(unlock_period))
}

/// Query parameters for a single-date lock check.
#[derive(Debug, Deserialize)]
pub struct CheckLockQuery {
    /// Date to check.
    pub date: NaiveDate,
    /// `write` (default) treats a failed lookup as locked; `read` as unlocked.
    pub mode: Option<String>,
}

/// Query parameters for a range lock check.
#[derive(Debug, Deserialize)]
pub struct CheckRangeLockQuery {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
    /// `write` (default) or `read`.
    pub mode: Option<String>,
}

/// Body for a lock request.
#[derive(Debug, Default, Deserialize)]
pub struct LockRequest {
    /// `closed` (default) or `locked`.
    pub status: Option<String>,
}

fn parse_mode(mode: Option<&str>) -> ApiResult<LockCheckMode> {
    match mode.map(str::to_lowercase).as_deref() {
        None | Some("write") => Ok(LockCheckMode::Write),
        Some("read") => Ok(LockCheckMode::Read),
        Some(other) => Err(ApiError::validation(format!(
            "Invalid mode '{other}'; expected read or write"
        ))),
    }
}

fn parse_lock_status(status: Option<&str>) -> ApiResult<PeriodStatus> {
    match status {
        None => Ok(PeriodStatus::Closed),
        Some(raw) => PeriodStatus::parse(raw)
            .filter(PeriodStatus::blocks_writes)
            .ok_or_else(|| {
                ApiError::validation(format!("Invalid status '{raw}'; expected closed or locked"))
            }),
    }
}

fn period_repo(state: &AppState) -> PeriodRepository {
    PeriodRepository::new((*state.db).clone(), state.ledger.max_range_lock_days)
}

async fn member_role(state: &AppState, auth: &AuthUser) -> ApiResult<MemberRole> {
    CompanyRepository::new((*state.db).clone())
        .member_role(auth.company_id(), auth.user_id())
        .await?
        .ok_or_else(|| ApiError::forbidden("You are not a member of this company"))
}

/// GET /periods
async fn list_periods(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AccountingPeriod>>> {
    Ok(Json(period_repo(&state).list(auth.company_id()).await?))
}

/// GET /periods/check-lock?date=
async fn check_lock(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<CheckLockQuery>, QueryRejection>,
) -> ApiResult<Json<LockStatus>> {
    let Query(query) = query?;
    let mode = parse_mode(query.mode.as_deref())?;
    Ok(Json(
        period_repo(&state)
            .check_lock(auth.company_id(), query.date, mode)
            .await,
    ))
}

/// GET /periods/check-range-lock?from=&to=
async fn check_range_lock(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<CheckRangeLockQuery>, QueryRejection>,
) -> ApiResult<Json<LockStatus>> {
    let Query(query) = query?;
    let mode = parse_mode(query.mode.as_deref())?;
    kontor_core::period::validate_range(query.from, query.to, state.ledger.max_range_lock_days)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    Ok(Json(
        period_repo(&state)
            .check_range_lock(auth.company_id(), query.from, query.to, mode)
            .await?,
    ))
}

/// POST /periods/{period_id}/lock
async fn lock_period(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    body: Option<Json<LockRequest>>,
) -> ApiResult<Json<AccountingPeriod>> {
    let Path(period_id) = path?;
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let target = parse_lock_status(request.status.as_deref())?;
    let role = member_role(&state, &auth).await?;

    let period = period_repo(&state)
        .lock_period(
            auth.company_id(),
            PeriodId::from_uuid(period_id),
            auth.user_id(),
            role,
            target,
        )
        .await?;

    info!(period = %period.period_name, status = %period.status, "Period locked via API");
    Ok(Json(period))
}

/// POST /periods/{period_id}/unlock
async fn unlock_period(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<AccountingPeriod>> {
    let Path(period_id) = path?;
    let role = member_role(&state, &auth).await?;

    let period = period_repo(&state)
        .unlock_period(
            auth.company_id(),
            PeriodId::from_uuid(period_id),
            auth.user_id(),
            role,
        )
        .await?;

    info!(period = %period.period_name, "Period unlocked via API");
    Ok(Json(period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some(LockCheckMode::Write))]
    #[case(Some("write"), Some(LockCheckMode::Write))]
    #[case(Some("READ"), Some(LockCheckMode::Read))]
    #[case(Some("maybe"), None)]
    fn test_parse_mode(#[case] input: Option<&str>, #[case] expected: Option<LockCheckMode>) {
        assert_eq!(parse_mode(input).ok(), expected);
    }

    #[rstest]
    #[case(None, Some(PeriodStatus::Closed))]
    #[case(Some("locked"), Some(PeriodStatus::Locked))]
    #[case(Some("closed"), Some(PeriodStatus::Closed))]
    #[case(Some("open"), None)]
    #[case(Some("frozen"), None)]
    fn test_parse_lock_status(#[case] input: Option<&str>, #[case] expected: Option<PeriodStatus>) {
        assert_eq!(parse_lock_status(input).ok(), expected);
    }
}
