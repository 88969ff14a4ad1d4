//! Account and journal line types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use kontor_shared::types::{AccountId, JournalEntryId};

/// Account classification in the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Assets (cash, receivables, inventory).
    Asset,
    /// Liabilities (payables, loans, tax payable).
    Liability,
    /// Owner's equity.
    Equity,
    /// Income, also stored as "revenue" by older rows.
    #[serde(alias = "revenue")]
    Income,
    /// Expenses, including cost of goods sold.
    Expense,
}

impl AccountType {
    /// Parses a stored account type, accepting `revenue` for `income`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "income" | "revenue" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Returns the side on which this account type normally carries a balance.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Income => NormalBalance::Credit,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Natural balance side of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal (assets, expenses).
    Debit,
    /// Credit-normal (liabilities, equity, income).
    Credit,
}

impl NormalBalance {
    /// Parses a stored normal balance.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Account code (e.g., "1100").
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Free-form tag such as `cash`, `bank`, `cogs` or `vat_input`.
    pub sub_type: Option<String>,
    /// Natural balance side.
    pub normal_balance: NormalBalance,
    /// Balance carried in before the first journal line.
    pub opening_balance: Decimal,
    /// Inactive accounts take no new postings. Reports still show them while
    /// they carry reportable lines.
    pub is_active: bool,
}

impl Account {
    /// Whether a report lists the account: active, or holding reportable lines.
    #[must_use]
    pub const fn is_reported(&self, has_activity: bool) -> bool {
        self.is_active || has_activity
    }

    /// Returns true if the account's sub-type is one of `sub_types`, ignoring case.
    #[must_use]
    pub fn has_sub_type(&self, sub_types: &[&str]) -> bool {
        self.sub_type
            .as_deref()
            .is_some_and(|s| sub_types.iter().any(|t| s.eq_ignore_ascii_case(t)))
    }
}

/// Status of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Still being edited, never reported.
    Draft,
    /// Finalized and eligible to affect balances.
    Posted,
    /// Cancelled, never reported.
    Void,
}

impl EntryStatus {
    /// Parses a stored status. Unrecognized values are treated as drafts.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "posted" => Self::Posted,
            "void" | "voided" => Self::Void,
            _ => Self::Draft,
        }
    }

    /// Returns the canonical lowercase status name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Void => "void",
        }
    }
}

/// A journal line joined with the header fields of its entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Line ID.
    pub line_id: Uuid,
    /// Parent entry.
    pub entry_id: JournalEntryId,
    /// Human-readable entry number.
    pub entry_number: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry status.
    pub entry_status: EntryStatus,
    /// Whether the parent entry is soft-deleted.
    pub entry_deleted: bool,
    /// Free-text category of the source document (e.g., `invoice`).
    pub reference_type: Option<String>,
    /// Source document ID.
    pub reference_id: Option<Uuid>,
    /// Line description, falling back to the entry description.
    pub description: Option<String>,
    /// Account posted to.
    pub account_id: AccountId,
    /// Debit amount, never negative.
    pub debit: Decimal,
    /// Credit amount, never negative.
    pub credit: Decimal,
    /// Branch tag.
    pub branch_id: Option<Uuid>,
    /// Cost center tag.
    pub cost_center_id: Option<Uuid>,
}

impl LedgerLine {
    /// Only lines of posted, non-deleted entries affect reports.
    #[must_use]
    pub fn is_reportable(&self) -> bool {
        self.entry_status == EntryStatus::Posted && !self.entry_deleted
    }

    /// Signed line effect, `debit - credit`.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if the reference type equals `reference_type`, ignoring case.
    #[must_use]
    pub fn has_reference_type(&self, reference_type: &str) -> bool {
        self.reference_type
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case(reference_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_accepts_revenue_alias() {
        assert_eq!(AccountType::parse("revenue"), Some(AccountType::Income));
        assert_eq!(AccountType::parse("Income"), Some(AccountType::Income));
        assert_eq!(AccountType::parse("contra"), None);

        let parsed: AccountType = serde_json::from_str("\"revenue\"").unwrap();
        assert_eq!(parsed, AccountType::Income);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"income\"");
    }

    #[test]
    fn test_normal_balance_by_type() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Liability.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Income.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn test_unknown_entry_status_is_not_posted() {
        assert_eq!(EntryStatus::parse("POSTED"), EntryStatus::Posted);
        assert_eq!(EntryStatus::parse("voided"), EntryStatus::Void);
        assert_eq!(EntryStatus::parse("pending_approval"), EntryStatus::Draft);
    }
}
