//! Audit events for journal entry edits and deletes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use kontor_shared::types::{AccountId, CompanyId, JournalEntryId, UserId};

use super::error::AuditError;
use super::event::{AuditAction, AuditEvent};

const JOURNAL_ENTRIES_TABLE: &str = "journal_entries";

/// A journal line as captured in an audit snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLineSnapshot {
    /// Account posted to.
    pub account_id: AccountId,
    /// Debit amount.
    pub debit_amount: Decimal,
    /// Credit amount.
    pub credit_amount: Decimal,
    /// Line description.
    pub description: Option<String>,
}

/// Lines of an entry plus their debit total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    /// Raw line array.
    pub lines: Vec<JournalLineSnapshot>,
    /// Sum of debit amounts.
    pub total: Decimal,
}

impl EntrySnapshot {
    /// Captures `lines` and computes their debit total.
    #[must_use]
    pub fn new(lines: Vec<JournalLineSnapshot>) -> Self {
        let total = lines.iter().map(|l| l.debit_amount).sum();
        Self { lines, total }
    }
}

/// Builds the audit event for an edited journal entry.
///
/// Both snapshots carry their debit totals so the monetary delta of the edit
/// is visible without re-deriving it.
///
/// # Errors
///
/// Returns an error if a snapshot cannot be serialized.
pub fn journal_entry_edit(
    company_id: CompanyId,
    user_id: UserId,
    entry_id: JournalEntryId,
    entry_number: &str,
    old_lines: Vec<JournalLineSnapshot>,
    new_lines: Vec<JournalLineSnapshot>,
    reason: Option<String>,
) -> Result<AuditEvent, AuditError> {
    let old_data = serde_json::to_value(EntrySnapshot::new(old_lines))?;
    let new_data = serde_json::to_value(EntrySnapshot::new(new_lines))?;

    Ok(AuditEvent::new(
        company_id,
        user_id,
        AuditAction::Update.as_str(),
        JOURNAL_ENTRIES_TABLE,
        entry_id.to_string(),
    )?
    .with_identifier(entry_number)
    .with_data(Some(old_data), Some(new_data))
    .with_reason(reason))
}

/// Builds the audit event for a deleted journal entry.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialized.
pub fn journal_entry_delete(
    company_id: CompanyId,
    user_id: UserId,
    entry_id: JournalEntryId,
    entry_number: &str,
    lines: Vec<JournalLineSnapshot>,
    reason: Option<String>,
) -> Result<AuditEvent, AuditError> {
    let old_data = serde_json::to_value(EntrySnapshot::new(lines))?;

    Ok(AuditEvent::new(
        company_id,
        user_id,
        AuditAction::Delete.as_str(),
        JOURNAL_ENTRIES_TABLE,
        entry_id.to_string(),
    )?
    .with_identifier(entry_number)
    .with_data(Some(old_data), None)
    .with_reason(reason))
}
