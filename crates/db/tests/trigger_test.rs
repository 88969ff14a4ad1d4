//! Integration tests for store-level integrity triggers.
//!
//! These verify that PostgreSQL rejects audit log updates and journal writes
//! in closed periods even when application code skips its own checks.

mod common;

use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use common::{cleanup_company, connect, date, entry_model, line_model, setup_company};
use kontor_db::entities::{audit_logs, journal_entries};

#[tokio::test]
async fn test_audit_log_update_is_rejected_and_delete_allowed() {
    let Some(db) = connect().await else { return };
    let data = match setup_company(&db, "open").await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Skipping test - setup failed: {e}");
            return;
        }
    };

    let audit_id = Uuid::new_v4();
    audit_logs::ActiveModel {
        id: Set(audit_id),
        company_id: Set(data.company_id),
        user_id: Set(data.owner_id),
        action: Set("INSERT".to_string()),
        target_table: Set("journal_entries".to_string()),
        record_id: Set(Uuid::new_v4().to_string()),
        changed_fields: Set(serde_json::json!([])),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to insert audit row");

    let update = db
        .execute_unprepared(&format!(
            "UPDATE audit_logs SET reason = 'tampered' WHERE id = '{audit_id}'"
        ))
        .await;
    assert!(update.is_err(), "UPDATE on audit_logs must be rejected");

    let row = audit_logs::Entity::find_by_id(audit_id)
        .one(&db)
        .await
        .expect("Failed to query audit row")
        .expect("Audit row missing");
    assert!(row.reason.is_none());

    let deleted = audit_logs::Entity::delete_by_id(audit_id)
        .exec(&db)
        .await
        .expect("DELETE on audit_logs should be allowed");
    assert_eq!(deleted.rows_affected, 1);

    cleanup_company(&db, &data).await.expect("Cleanup failed");
}

#[tokio::test]
async fn test_closed_period_rejects_journal_insert() {
    let Some(db) = connect().await else { return };
    let data = match setup_company(&db, "closed").await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Skipping test - setup failed: {e}");
            return;
        }
    };

    let result = entry_model(data.company_id, "JE-0001", date(2026, 1, 15), None)
        .insert(&db)
        .await;
    let err = result.expect_err("Insert into a closed period must fail");
    assert!(err.to_string().contains("January 2026"), "unexpected error: {err}");

    // Outside the closed period the same insert succeeds.
    entry_model(data.company_id, "JE-0002", date(2026, 2, 1), None)
        .insert(&db)
        .await
        .expect("Insert outside the period should succeed");

    cleanup_company(&db, &data).await.expect("Cleanup failed");
}

#[tokio::test]
async fn test_open_period_allows_journal_writes() {
    let Some(db) = connect().await else { return };
    let data = match setup_company(&db, "open").await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Skipping test - setup failed: {e}");
            return;
        }
    };

    let entry = entry_model(data.company_id, "JE-0001", date(2026, 1, 15), None)
        .insert(&db)
        .await
        .expect("Insert into an open period should succeed");
    line_model(entry.id, data.bank_id, dec!(100), dec!(0))
        .insert(&db)
        .await
        .expect("Line insert should succeed");
    line_model(entry.id, data.revenue_id, dec!(0), dec!(100))
        .insert(&db)
        .await
        .expect("Line insert should succeed");

    cleanup_company(&db, &data).await.expect("Cleanup failed");
}

#[tokio::test]
async fn test_locking_freezes_existing_entries() {
    let Some(db) = connect().await else { return };
    let data = match setup_company(&db, "open").await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Skipping test - setup failed: {e}");
            return;
        }
    };

    let entry = entry_model(data.company_id, "JE-0001", date(2026, 1, 15), None)
        .insert(&db)
        .await
        .expect("Insert into an open period should succeed");

    db.execute_unprepared(&format!(
        "UPDATE accounting_periods SET is_locked = TRUE WHERE id = '{}'",
        data.period_id
    ))
    .await
    .expect("Failed to lock period");

    let moved = journal_entries::ActiveModel {
        id: Set(entry.id),
        entry_date: Set(date(2026, 2, 15)),
        ..Default::default()
    }
    .update(&db)
    .await;
    assert!(moved.is_err(), "Moving an entry out of a locked period must fail");

    let line = line_model(entry.id, data.bank_id, dec!(50), dec!(0)).insert(&db).await;
    assert!(line.is_err(), "Adding a line to a locked entry must fail");

    let deleted = journal_entries::Entity::delete_many()
        .filter(journal_entries::Column::Id.eq(entry.id))
        .exec(&db)
        .await;
    assert!(deleted.is_err(), "Deleting a locked entry must fail");

    cleanup_company(&db, &data).await.expect("Cleanup failed");
}
