//! Audit trail event construction.
//!
//! Builds the immutable rows appended to the audit log. Persisting them is
//! the repository's job; nothing here ever edits an existing event.

pub mod error;
pub mod event;
pub mod journal;


pub use error::AuditError;
pub use event::{AuditAction, AuditEvent, AuditOutcome, changed_fields, normalize_action};
pub use journal::{EntrySnapshot, JournalLineSnapshot, journal_entry_delete, journal_entry_edit};
