//! Audit event types and verb normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use kontor_shared::types::{CompanyId, UserId};

use super::error::AuditError;

/// Closed set of actions stored in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    /// Record was created.
    Insert,
    /// Record was modified (including voids).
    Update,
    /// Record was removed.
    Delete,
    /// Record was reversed by a compensating record.
    Revert,
}

impl AuditAction {
    /// Returns the stored action name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Revert => "REVERT",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a caller-facing verb onto the stored action vocabulary.
///
/// Matching is case-insensitive. A void keeps the record in place with a new
/// status, so it is stored as `UPDATE`.
///
/// # Errors
///
/// Returns `UnknownAction` for verbs outside the mapping.
pub fn normalize_action(verb: &str) -> Result<AuditAction, AuditError> {
    match verb.trim().to_lowercase().as_str() {
        "create" | "insert" => Ok(AuditAction::Insert),
        "update" | "edit" | "void" => Ok(AuditAction::Update),
        "delete" => Ok(AuditAction::Delete),
        "reverse" | "revert" => Ok(AuditAction::Revert),
        _ => Err(AuditError::UnknownAction(verb.to_string())),
    }
}

/// Returns the top-level keys whose values differ between two snapshots.
///
/// Non-object snapshots are compared as a whole and reported under `"value"`.
#[must_use]
pub fn changed_fields(old: &Value, new: &Value) -> Vec<String> {
    match (old, new) {
        (Value::Object(before), Value::Object(after)) => {
            let mut fields: Vec<String> = before
                .keys()
                .chain(after.keys().filter(|k| !before.contains_key(*k)))
                .filter(|k| before.get(*k) != after.get(*k))
                .cloned()
                .collect();
            fields.sort();
            fields
        }
        _ if old == new => Vec::new(),
        _ => vec!["value".to_string()],
    }
}

/// One audit log row, ready to append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Owning company.
    pub company_id: CompanyId,
    /// Acting user.
    pub user_id: UserId,
    /// Normalized action.
    pub action: AuditAction,
    /// Table the record lives in.
    pub target_table: String,
    /// Primary key of the record, as text.
    pub record_id: String,
    /// Human-readable identifier (e.g., entry number).
    pub record_identifier: Option<String>,
    /// State before the mutation.
    pub old_data: Option<Value>,
    /// State after the mutation.
    pub new_data: Option<Value>,
    /// Keys that differ between `old_data` and `new_data`.
    pub changed_fields: Vec<String>,
    /// Free-text justification.
    pub reason: Option<String>,
    /// Parent record for line-level events.
    pub parent_record_id: Option<String>,
}

impl AuditEvent {
    /// Starts an event for `record_id` in `target_table`, normalizing `verb`.
    ///
    /// # Errors
    ///
    /// Returns an error if the verb is unknown or the target is empty.
    pub fn new(
        company_id: CompanyId,
        user_id: UserId,
        verb: &str,
        target_table: impl Into<String>,
        record_id: impl Into<String>,
    ) -> Result<Self, AuditError> {
        let action = normalize_action(verb)?;
        let target_table = target_table.into();
        let record_id = record_id.into();

        if target_table.trim().is_empty() || record_id.trim().is_empty() {
            return Err(AuditError::MissingTarget);
        }

        Ok(Self {
            company_id,
            user_id,
            action,
            target_table,
            record_id,
            record_identifier: None,
            old_data: None,
            new_data: None,
            changed_fields: Vec::new(),
            reason: None,
            parent_record_id: None,
        })
    }

    /// Sets the human-readable identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.record_identifier = Some(identifier.into());
        self
    }

    /// Sets the before/after snapshots and recomputes the changed fields.
    #[must_use]
    pub fn with_data(mut self, old_data: Option<Value>, new_data: Option<Value>) -> Self {
        self.changed_fields = match (&old_data, &new_data) {
            (Some(old), Some(new)) => changed_fields(old, new),
            _ => Vec::new(),
        };
        self.old_data = old_data;
        self.new_data = new_data;
        self
    }

    /// Sets the reason.
    #[must_use]
    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason.filter(|r| !r.trim().is_empty());
        self
    }

    /// Sets the parent record id.
    #[must_use]
    pub fn with_parent(mut self, parent_record_id: impl Into<String>) -> Self {
        self.parent_record_id = Some(parent_record_id.into());
        self
    }
}

/// Result of a best-effort audit append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditOutcome {
    /// Whether the row was written.
    pub success: bool,
    /// Failure message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditOutcome {
    /// The row was written.
    #[must_use]
    pub const fn written() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// The row could not be written.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
