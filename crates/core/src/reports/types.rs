//! Report data types.
//!
//! Field names serialize in camelCase; amounts serialize as JSON numbers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use kontor_shared::types::AccountId;

use super::error::ReportError;
use crate::ledger::{AccountType, UnbalancedEntry};

/// Inclusive reporting range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `from > to`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ReportError> {
        if from > to {
            return Err(ReportError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Returns true if `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// One line in an account's ledger, with the running balance after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    /// Entry date.
    pub date: NaiveDate,
    /// Entry number.
    pub entry_number: String,
    /// Line description.
    pub description: Option<String>,
    /// Source document category.
    pub reference_type: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance after this line.
    pub balance: Decimal,
}

/// Ledger of a single account over the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLedger {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Account sub-type tag.
    pub sub_type: Option<String>,
    /// Balance before the first day of the range.
    pub opening_balance: Decimal,
    /// In-range lines in date order.
    pub transactions: Vec<LedgerTransaction>,
    /// Balance after the last in-range line.
    pub closing_balance: Decimal,
    /// Sum of in-range debits.
    pub total_debit: Decimal,
    /// Sum of in-range credits.
    pub total_credit: Decimal,
    /// Number of in-range lines.
    pub transaction_count: usize,
}

/// Totals across every account in a general ledger report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralLedgerSummary {
    /// Sum of in-range debits.
    pub total_debit: Decimal,
    /// Sum of in-range credits.
    pub total_credit: Decimal,
    /// Accounts included in the report.
    pub account_count: usize,
    /// In-range lines across all accounts.
    pub transaction_count: usize,
    /// Whether debits equal credits within materiality.
    pub is_balanced: bool,
}

/// General ledger report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralLedgerReport {
    /// Accounts ordered by code.
    pub accounts: Vec<AccountLedger>,
    /// Reporting range.
    pub period: DateRange,
    /// Report totals.
    pub summary: GeneralLedgerSummary,
}

/// One account row of a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Sum of in-range debits.
    pub total_debit: Decimal,
    /// Sum of in-range credits.
    pub total_credit: Decimal,
    /// `total_debit - total_credit`.
    pub balance: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// `total_debit - total_credit`.
    pub difference: Decimal,
    /// Whether debits equal credits within materiality.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceReport {
    /// Accounts with activity in the range, ordered by code.
    pub accounts: Vec<TrialBalanceRow>,
    /// Reporting range.
    pub period: DateRange,
    /// Totals.
    pub totals: TrialBalanceTotals,
    /// Entries in range whose own lines do not balance.
    pub unbalanced_entries: Vec<UnbalancedEntry>,
}
