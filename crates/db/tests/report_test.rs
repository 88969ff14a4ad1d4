//! End-to-end report derivation against a real database.

mod common;

use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};

use common::{cleanup_company, connect, date, entry_model, line_model, setup_company};
use kontor_core::audit::AuditEvent;
use kontor_core::cashflow::CashFlowCategory;
use kontor_core::ledger::LineFilter;
use kontor_core::reports::DateRange;
use kontor_db::entities::journal_entries;
use kontor_db::repositories::{AuditLogFilter, AuditRepository, ReportRepository};
use kontor_shared::types::{AccountId, CompanyId, PageRequest, UserId};

#[tokio::test]
async fn test_january_scenario() {
    let Some(db) = connect().await else { return };
    let data = match setup_company(&db, "open").await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Skipping test - setup failed: {e}");
            return;
        }
    };

    let e1 = entry_model(data.company_id, "JE-0001", date(2026, 1, 10), Some("invoice_payment"))
        .insert(&db)
        .await
        .expect("Insert failed");
    line_model(e1.id, data.bank_id, dec!(1000), dec!(0)).insert(&db).await.expect("Insert failed");
    line_model(e1.id, data.revenue_id, dec!(0), dec!(1000)).insert(&db).await.expect("Insert failed");

    let e2 = entry_model(data.company_id, "JE-0002", date(2026, 1, 15), Some("salary"))
        .insert(&db)
        .await
        .expect("Insert failed");
    line_model(e2.id, data.expense_id, dec!(400), dec!(0)).insert(&db).await.expect("Insert failed");
    line_model(e2.id, data.bank_id, dec!(0), dec!(400)).insert(&db).await.expect("Insert failed");

    // A draft must not show up anywhere.
    let mut draft = entry_model(data.company_id, "JE-0003", date(2026, 1, 20), None);
    draft.status = Set("draft".to_string());
    let draft = draft.insert(&db).await.expect("Insert failed");
    line_model(draft.id, data.bank_id, dec!(999), dec!(0)).insert(&db).await.expect("Insert failed");

    let repo = ReportRepository::new(db.clone());
    let company = CompanyId::from_uuid(data.company_id);
    let range = DateRange::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();

    let gl = repo
        .general_ledger(
            company,
            range,
            &LineFilter::new().with_account(Some(AccountId::from_uuid(data.bank_id))),
        )
        .await
        .expect("General ledger failed");
    let bank = &gl.accounts[0];
    let balances: Vec<_> = bank.transactions.iter().map(|t| t.balance).collect();
    assert_eq!(balances, vec![dec!(1000), dec!(600)]);
    assert_eq!(bank.closing_balance, dec!(600));

    let tb = repo.trial_balance(company, range).await.expect("Trial balance failed");
    assert_eq!(tb.totals.total_debit, dec!(1400));
    assert_eq!(tb.totals.total_credit, dec!(1400));
    assert!(tb.totals.is_balanced);
    assert!(tb.unbalanced_entries.is_empty());

    let cf = repo.cash_flow(company, range).await.expect("Cash flow failed");
    assert_eq!(cf.section(CashFlowCategory::Operating).total, dec!(600));
    assert_eq!(cf.net_cash_flow, dec!(600));

    let dash = repo.dashboard(company, range).await.expect("Dashboard failed");
    assert_eq!(dash.revenue, dec!(1000));
    assert_eq!(dash.net_profit, dec!(600));

    // Soft-deleting an entry removes it from every report.
    journal_entries::ActiveModel {
        id: Set(e2.id),
        is_deleted: Set(true),
        ..Default::default()
    }
    .update(&db)
    .await
    .expect("Soft delete failed");
    let tb = repo.trial_balance(company, range).await.expect("Trial balance failed");
    assert_eq!(tb.totals.total_debit, dec!(1000));

    cleanup_company(&db, &data).await.expect("Cleanup failed");
}

#[tokio::test]
async fn test_audit_events_are_listed_newest_first() {
    let Some(db) = connect().await else { return };
    let data = match setup_company(&db, "open").await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Skipping test - setup failed: {e}");
            return;
        }
    };

    let repo = AuditRepository::new(db.clone());
    let company = CompanyId::from_uuid(data.company_id);
    let user = UserId::from_uuid(data.owner_id);

    for verb in ["create", "void"] {
        let event = AuditEvent::new(company, user, verb, "journal_entries", "JE-0001")
            .expect("Valid event");
        let outcome = repo.log_event(&event).await;
        assert!(outcome.success, "audit write failed: {:?}", outcome.error);
    }

    let page = repo
        .list(
            company,
            &AuditLogFilter {
                target_table: Some("journal_entries".to_string()),
                record_id: None,
            },
            &PageRequest::new(1, 10),
        )
        .await
        .expect("List failed");
    let actions: Vec<_> = page.data.iter().map(|r| r.action.as_str()).collect();
    assert_eq!(actions, vec!["UPDATE", "INSERT"]);
    assert_eq!(page.meta.total, 2);

    cleanup_company(&db, &data).await.expect("Cleanup failed");
}

#[tokio::test]
async fn test_default_range_ignores_entries_with_deleted_at() {
    let Some(db) = connect().await else { return };
    let data = match setup_company(&db, "open").await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Skipping test - setup failed: {e}");
            return;
        }
    };

    // Deleted through the timestamp only, with is_deleted left false.
    let mut purged = entry_model(data.company_id, "JE-0000", date(2025, 12, 15), None);
    purged.deleted_at = Set(Some(chrono::Utc::now().into()));
    let purged = purged.insert(&db).await.expect("Insert failed");
    line_model(purged.id, data.bank_id, dec!(50), dec!(0)).insert(&db).await.expect("Insert failed");
    line_model(purged.id, data.revenue_id, dec!(0), dec!(50)).insert(&db).await.expect("Insert failed");

    let live = entry_model(data.company_id, "JE-0001", date(2026, 1, 10), None)
        .insert(&db)
        .await
        .expect("Insert failed");
    line_model(live.id, data.bank_id, dec!(100), dec!(0)).insert(&db).await.expect("Insert failed");
    line_model(live.id, data.revenue_id, dec!(0), dec!(100)).insert(&db).await.expect("Insert failed");

    let repo = ReportRepository::new(db.clone());
    let range = repo
        .resolve_range(
            CompanyId::from_uuid(data.company_id),
            None,
            Some(date(2026, 1, 31)),
            date(2026, 2, 1),
        )
        .await
        .expect("Range failed");
    assert_eq!(range.from, date(2026, 1, 10));
    assert_eq!(range.to, date(2026, 1, 31));

    cleanup_company(&db, &data).await.expect("Cleanup failed");
}
