//! Line filters for account and dimension scoped reports.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use kontor_shared::types::AccountId;

use super::types::LedgerLine;

/// Restricts report input to one account, branch or cost center.
///
/// Empty fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFilter {
    /// Only this account.
    pub account_id: Option<AccountId>,
    /// Only lines tagged with this branch.
    pub branch_id: Option<Uuid>,
    /// Only lines tagged with this cost center.
    pub cost_center_id: Option<Uuid>,
}

impl LineFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one account.
    #[must_use]
    pub const fn with_account(mut self, account_id: Option<AccountId>) -> Self {
        self.account_id = account_id;
        self
    }

    /// Restricts to one branch.
    #[must_use]
    pub const fn with_branch(mut self, branch_id: Option<Uuid>) -> Self {
        self.branch_id = branch_id;
        self
    }

    /// Restricts to one cost center.
    #[must_use]
    pub const fn with_cost_center(mut self, cost_center_id: Option<Uuid>) -> Self {
        self.cost_center_id = cost_center_id;
        self
    }

    /// Returns true if the line passes the branch and cost center tags.
    ///
    /// The account restriction applies to the account list, not to lines.
    #[must_use]
    pub fn matches(&self, line: &LedgerLine) -> bool {
        self.branch_id.is_none_or(|b| line.branch_id == Some(b))
            && self.cost_center_id.is_none_or(|c| line.cost_center_id == Some(c))
    }
}
