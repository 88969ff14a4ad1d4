//! Audit error types.

use thiserror::Error;

/// Errors that can occur while building an audit event.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Caller used a verb with no audit action mapping.
    #[error("Unknown audit action: {0}")]
    UnknownAction(String),

    /// Target table or record id was empty.
    #[error("Audit event requires a target table and record id")]
    MissingTarget,

    /// Snapshot could not be serialized to JSON.
    #[error("Failed to serialize audit snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}
