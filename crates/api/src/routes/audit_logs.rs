//! Audit log read route.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Deserialize;

use crate::{AppState, error::ApiResult, middleware::AuthUser};
use kontor_db::AuditRepository;
use kontor_db::repositories::{AuditLogFilter, AuditLogRecord};
use kontor_shared::types::{PageRequest, PageResponse};

/// Creates the audit log routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/audit-logs", get(list_audit_logs))
}

/// Query parameters for the audit log listing.
#[derive(Debug, Default, Deserialize)]
pub struct AuditLogQuery {
    /// Only rows for this table.
    pub target_table: Option<String>,
    /// Only rows for this record.
    pub record_id: Option<String>,
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// GET /audit-logs
async fn list_audit_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<AuditLogQuery>, QueryRejection>,
) -> ApiResult<Json<PageResponse<AuditLogRecord>>> {
    let Query(query) = query?;
    let defaults = PageRequest::default();
    let page = PageRequest::new(
        query.page.unwrap_or(defaults.page),
        query.per_page.unwrap_or(defaults.per_page),
    );
    let filter = AuditLogFilter {
        target_table: query.target_table.filter(|t| !t.trim().is_empty()),
        record_id: query.record_id.filter(|r| !r.trim().is_empty()),
    };

    let logs = AuditRepository::new((*state.db).clone())
        .list(auth.company_id(), &filter, &page)
        .await?;
    Ok(Json(logs))
}
