//! Company membership roles.
//!
//! Role resolution itself belongs to the identity service; this module only
//! interprets the stored role string for period administration rules.

use serde::{Deserialize, Serialize};

/// User roles within a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Full access, the only role allowed to reopen a closed period.
    Owner,
    /// Full access except reopening periods.
    Admin,
    /// Can post and review entries.
    Accountant,
    /// Read-only access.
    Viewer,
}

impl MemberRole {
    /// Parses a stored role string, case-insensitively.
    #[must_use]
    pub fn parse(role: &str) -> Option<Self> {
        match role.trim().to_lowercase().as_str() {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "accountant" => Some(Self::Accountant),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Returns true if this role can close or lock an accounting period.
    #[must_use]
    pub const fn can_lock_periods(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Returns true if this role can reopen a closed or locked period.
    #[must_use]
    pub const fn can_unlock_periods(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Returns the canonical lowercase role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Accountant => "accountant",
            Self::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(MemberRole::Owner.can_lock_periods());
        assert!(MemberRole::Admin.can_lock_periods());
        assert!(!MemberRole::Accountant.can_lock_periods());
        assert!(!MemberRole::Viewer.can_lock_periods());

        assert!(MemberRole::Owner.can_unlock_periods());
        assert!(!MemberRole::Admin.can_unlock_periods());
        assert!(!MemberRole::Accountant.can_unlock_periods());
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(MemberRole::parse("owner"), Some(MemberRole::Owner));
        assert_eq!(MemberRole::parse(" Admin "), Some(MemberRole::Admin));
        assert_eq!(MemberRole::parse("ACCOUNTANT"), Some(MemberRole::Accountant));
        assert_eq!(MemberRole::parse("auditor"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(MemberRole::Owner.to_string(), "owner");
        assert_eq!(MemberRole::Viewer.to_string(), "viewer");
    }
}
