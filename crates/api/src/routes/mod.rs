//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod audit_logs;
pub mod dashboard;
pub mod health;
pub mod periods;
pub mod reports;

/// Creates the API router: public health check plus authenticated routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(reports::routes())
        .merge(dashboard::routes())
        .merge(periods::routes())
        .merge(audit_logs::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
