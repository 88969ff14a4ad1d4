//! Authentication middleware for protected routes.
//!
//! Tokens are issued by the identity service; this layer only validates them
//! and exposes the caller's company context to handlers.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use kontor_shared::types::{CompanyId, UserId};
use kontor_shared::{AppError, Claims, JwtError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn unauthorized(message: &str) -> Response {
    ApiError(AppError::Unauthorized(message.to_string())).into_response()
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return unauthorized("Authorization header with Bearer token is required");
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(JwtError::Expired) => unauthorized("Token has expired"),
        Err(_) => unauthorized("Invalid or malformed token"),
    }
}

/// Extractor for authenticated user claims.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let company = auth.company_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.0.user_id())
    }

    /// Returns the company the caller acts for.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        CompanyId::from_uuid(self.0.company_id())
    }

    /// Returns the branch the token is scoped to, if any.
    #[must_use]
    pub const fn branch_id(&self) -> Option<Uuid> {
        self.0.branch_id()
    }

    /// Resolves the branch for a branch-scoped report.
    ///
    /// A branch-scoped token may only read its own branch.
    pub fn effective_branch(&self, requested: Option<Uuid>) -> Result<Option<Uuid>, ApiError> {
        match (self.branch_id(), requested) {
            (Some(own), Some(other)) if own != other => Err(ApiError::forbidden(
                "Token is not scoped to the requested branch",
            )),
            (Some(own), _) => Ok(Some(own)),
            (None, requested) => Ok(requested),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::Unauthorized("Authentication required".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn auth(branch: Option<Uuid>) -> AuthUser {
        let mut claims = Claims::new(Uuid::new_v4(), Uuid::new_v4(), "accountant", Utc::now());
        claims.branch = branch;
        AuthUser(claims)
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_effective_branch() {
        let branch = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert_eq!(auth(None).effective_branch(None).unwrap(), None);
        assert_eq!(auth(None).effective_branch(Some(other)).unwrap(), Some(other));
        assert_eq!(auth(Some(branch)).effective_branch(None).unwrap(), Some(branch));
        assert_eq!(
            auth(Some(branch)).effective_branch(Some(branch)).unwrap(),
            Some(branch)
        );
        assert!(auth(Some(branch)).effective_branch(Some(other)).is_err());
    }
}
