//! Dashboard routes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use super::reports::resolve;
use crate::{AppState, error::ApiError, error::ApiResult, middleware::AuthUser};
use kontor_core::dashboard::{DashboardPeriod, DashboardSummary, resolve_range};
use kontor_db::ReportRepository;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/gl-summary", get(get_gl_summary))
}

/// Query parameters for the dashboard summary.
///
/// An explicit `from`/`to` pair takes precedence over `period`.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// `today`, `week`, `month` or `year`; defaults to `month`.
    pub period: Option<String>,
    /// First day.
    pub from: Option<NaiveDate>,
    /// Last day.
    pub to: Option<NaiveDate>,
}

/// GET /dashboard/gl-summary
async fn get_gl_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> ApiResult<Json<DashboardSummary>> {
    let Query(query) = query?;
    let repo = ReportRepository::new((*state.db).clone());

    let range = if query.from.is_some() || query.to.is_some() {
        resolve(&repo, &auth, query.from, query.to).await?
    } else {
        let period = match query.period.as_deref() {
            None => DashboardPeriod::default(),
            Some(raw) => DashboardPeriod::parse(raw).ok_or_else(|| {
                ApiError::validation(format!(
                    "Invalid period '{raw}'; expected today, week, month or year"
                ))
            })?,
        };
        resolve_range(period, Utc::now().date_naive())
    };

    let summary = repo.dashboard(auth.company_id(), range).await?;
    Ok(Json(summary.rounded()))
}
