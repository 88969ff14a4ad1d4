//! Authentication claims resolved from the caller's token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// The identity service resolves the caller to a company (and optionally a
/// branch) before issuing the token; every ledger query is scoped by `company`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Company ID (current context).
    pub company: Uuid,
    /// Branch ID for branch-scoped reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Uuid>,
    /// User's role in the company, as asserted by the issuer.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, company_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            company: company_id,
            branch: None,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Scopes the claims to a branch.
    #[must_use]
    pub fn with_branch(mut self, branch_id: Uuid) -> Self {
        self.branch = Some(branch_id);
        self
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the company ID from claims.
    #[must_use]
    pub const fn company_id(&self) -> Uuid {
        self.company
    }

    /// Returns the branch ID from claims, if any.
    #[must_use]
    pub const fn branch_id(&self) -> Option<Uuid> {
        self.branch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let user_id = Uuid::new_v4();
        let company_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new(user_id, company_id, "owner", expires_at);

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.company_id(), company_id);
        assert_eq!(claims.branch_id(), None);
        assert_eq!(claims.role, "owner");
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_claims_with_branch() {
        let branch = Uuid::new_v4();
        let claims = Claims::new(Uuid::new_v4(), Uuid::new_v4(), "accountant", Utc::now())
            .with_branch(branch);

        assert_eq!(claims.branch_id(), Some(branch));
    }

    #[test]
    fn test_claims_branch_is_optional_in_json() {
        let json = serde_json::json!({
            "sub": Uuid::new_v4(),
            "company": Uuid::new_v4(),
            "role": "viewer",
            "iat": 0,
            "exp": 1,
        });

        let claims: Claims = serde_json::from_value(json).unwrap();
        assert!(claims.branch.is_none());
    }
}
