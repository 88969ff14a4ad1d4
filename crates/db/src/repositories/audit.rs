//! Append-only audit log storage.
//!
//! Writes are best-effort: a failed append is logged and reported through
//! [`AuditOutcome`], never propagated into the business mutation that caused it.
//! This repository only ever inserts into `audit_logs`.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};
use uuid::Uuid;

use crate::entities::audit_logs;
use kontor_core::audit::{AuditEvent, AuditOutcome};
use kontor_shared::types::{CompanyId, PageRequest, PageResponse};

/// Error types for audit log reads.
#[derive(Debug, thiserror::Error)]
pub enum AuditRepoError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Optional filters for listing audit rows.
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    /// Restrict to one table.
    pub target_table: Option<String>,
    /// Restrict to one record.
    pub record_id: Option<String>,
}

/// An audit row as returned to API callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRecord {
    /// Row ID.
    pub id: Uuid,
    /// Acting user.
    pub user_id: Uuid,
    /// Normalized action (`INSERT`, `UPDATE`, `DELETE`, `REVERT`).
    pub action: String,
    /// Table of the affected record.
    pub target_table: String,
    /// Affected record ID.
    pub record_id: String,
    /// Human-readable identifier such as an entry number.
    pub record_identifier: Option<String>,
    /// State before the mutation.
    pub old_data: Option<Value>,
    /// State after the mutation.
    pub new_data: Option<Value>,
    /// Keys that differ between the snapshots.
    pub changed_fields: Value,
    /// Free-text justification.
    pub reason: Option<String>,
    /// Parent record for line-level events.
    pub parent_record_id: Option<String>,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl From<audit_logs::Model> for AuditLogRecord {
    fn from(m: audit_logs::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            action: m.action,
            target_table: m.target_table,
            record_id: m.record_id,
            record_identifier: m.record_identifier,
            old_data: m.old_data,
            new_data: m.new_data,
            changed_fields: m.changed_fields,
            reason: m.reason,
            parent_record_id: m.parent_record_id,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

/// Audit log repository.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    db: DatabaseConnection,
}

impl AuditRepository {
    /// Creates a new audit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends one immutable audit row.
    ///
    /// Never fails the caller; check the returned outcome if it matters.
    pub async fn log_event(&self, event: &AuditEvent) -> AuditOutcome {
        match self.insert(event).await {
            Ok(id) => {
                debug!(
                    audit_id = %id,
                    target_table = %event.target_table,
                    record_id = %event.record_id,
                    action = event.action.as_str(),
                    "Audit event written"
                );
                AuditOutcome::written()
            }
            Err(e) => {
                error!(
                    error = %e,
                    company_id = %event.company_id,
                    target_table = %event.target_table,
                    record_id = %event.record_id,
                    action = event.action.as_str(),
                    "Failed to write audit event"
                );
                AuditOutcome::failed(e.to_string())
            }
        }
    }

    async fn insert(&self, event: &AuditEvent) -> Result<Uuid, DbErr> {
        let id = Uuid::now_v7();
        audit_logs::ActiveModel {
            id: Set(id),
            company_id: Set(event.company_id.into_inner()),
            user_id: Set(event.user_id.into_inner()),
            action: Set(event.action.as_str().to_string()),
            target_table: Set(event.target_table.clone()),
            record_id: Set(event.record_id.clone()),
            record_identifier: Set(event.record_identifier.clone()),
            old_data: Set(event.old_data.clone()),
            new_data: Set(event.new_data.clone()),
            changed_fields: Set(Value::from(event.changed_fields.clone())),
            reason: Set(event.reason.clone()),
            parent_record_id: Set(event.parent_record_id.clone()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(id)
    }

    /// Lists a company's audit rows, newest first.
    pub async fn list(
        &self,
        company_id: CompanyId,
        filter: &AuditLogFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<AuditLogRecord>, AuditRepoError> {
        let mut query = audit_logs::Entity::find()
            .filter(audit_logs::Column::CompanyId.eq(company_id.into_inner()));

        if let Some(table) = &filter.target_table {
            query = query.filter(audit_logs::Column::TargetTable.eq(table.as_str()));
        }
        if let Some(record_id) = &filter.record_id {
            query = query.filter(audit_logs::Column::RecordId.eq(record_id.as_str()));
        }

        let total = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_desc(audit_logs::Column::CreatedAt)
            .order_by_desc(audit_logs::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            rows.into_iter().map(AuditLogRecord::from).collect(),
            page,
            total,
        ))
    }
}
