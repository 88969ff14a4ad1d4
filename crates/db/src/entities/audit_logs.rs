//! `SeaORM` Entity for audit_logs table.
//!
//! Rows are append-only; the `trg_prevent_audit_log_update` trigger rejects
//! any UPDATE. `record_id` is a loose reference with no foreign key so history
//! survives deletion of the record.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub target_table: String,
    pub record_id: String,
    pub record_identifier: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub old_data: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub new_data: Option<Json>,
    #[sea_orm(column_type = "JsonBinary")]
    pub changed_fields: Json,
    pub reason: Option<String>,
    pub parent_record_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
