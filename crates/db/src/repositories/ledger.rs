//! Loads the chart of accounts and posted journal lines.
//!
//! Rows are mapped into `kontor_core` ledger types; all report arithmetic
//! happens in the core crate.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entities::{chart_of_accounts, journal_entries, journal_lines};
use kontor_core::ledger::{Account, AccountType, EntryStatus, LedgerLine, NormalBalance};
use kontor_shared::types::{AccountId, CompanyId, JournalEntryId};

/// Postgres caps bind parameters per statement; `IN` lists are chunked below it.
const ID_CHUNK: usize = 5_000;

/// Error types for ledger loading.
#[derive(Debug, thiserror::Error)]
pub enum LedgerRepoError {
    /// An account row carries a type or normal balance the core does not know.
    #[error("Account {code} has invalid {field} '{value}'")]
    InvalidAccount {
        /// Account code.
        code: String,
        /// Column name.
        field: &'static str,
        /// Stored value.
        value: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

fn to_account(model: chart_of_accounts::Model) -> Result<Account, LedgerRepoError> {
    let account_type =
        AccountType::parse(&model.account_type).ok_or_else(|| LedgerRepoError::InvalidAccount {
            code: model.code.clone(),
            field: "account_type",
            value: model.account_type.clone(),
        })?;
    let normal_balance = NormalBalance::parse(&model.normal_balance).ok_or_else(|| {
        LedgerRepoError::InvalidAccount {
            code: model.code.clone(),
            field: "normal_balance",
            value: model.normal_balance.clone(),
        }
    })?;

    Ok(Account {
        id: AccountId::from_uuid(model.id),
        code: model.code,
        name: model.name,
        account_type,
        sub_type: model.sub_type,
        normal_balance,
        opening_balance: model.opening_balance,
        is_active: model.is_active,
    })
}

fn to_line(line: journal_lines::Model, entry: &journal_entries::Model) -> LedgerLine {
    LedgerLine {
        line_id: line.id,
        entry_id: JournalEntryId::from_uuid(entry.id),
        entry_number: entry.entry_number.clone(),
        entry_date: entry.entry_date,
        entry_status: EntryStatus::parse(&entry.status),
        entry_deleted: entry.is_deleted || entry.deleted_at.is_some(),
        reference_type: entry.reference_type.clone(),
        reference_id: entry.reference_id,
        description: line.description.or_else(|| entry.description.clone()),
        account_id: AccountId::from_uuid(line.account_id),
        debit: line.debit_amount,
        credit: line.credit_amount,
        branch_id: line.branch_id,
        cost_center_id: line.cost_center_id,
    }
}

/// Ledger repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the company's chart of accounts, active and inactive, by code.
    pub async fn accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, LedgerRepoError> {
        chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::CompanyId.eq(company_id.into_inner()))
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_account)
            .collect()
    }

    /// Returns lines of posted, non-deleted entries dated on or before `to`,
    /// and on or after `from` when given.
    ///
    /// Pass `from = None` when the caller needs history for opening balances.
    pub async fn posted_lines(
        &self,
        company_id: CompanyId,
        from: Option<NaiveDate>,
        to: NaiveDate,
    ) -> Result<Vec<LedgerLine>, LedgerRepoError> {
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::CompanyId.eq(company_id.into_inner()))
            .filter(journal_entries::Column::Status.eq(EntryStatus::Posted.as_str()))
            .filter(journal_entries::Column::IsDeleted.eq(false))
            .filter(journal_entries::Column::DeletedAt.is_null())
            .filter(journal_entries::Column::EntryDate.lte(to));

        if let Some(from) = from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }

        let entries = query.all(&self.db).await?;
        self.lines_for(entries).await
    }

    /// Returns the date of the company's earliest posted entry.
    pub async fn first_entry_date(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<NaiveDate>, LedgerRepoError> {
        let first = journal_entries::Entity::find()
            .select_only()
            .column(journal_entries::Column::EntryDate)
            .filter(journal_entries::Column::CompanyId.eq(company_id.into_inner()))
            .filter(journal_entries::Column::Status.eq(EntryStatus::Posted.as_str()))
            .filter(journal_entries::Column::IsDeleted.eq(false))
            .filter(journal_entries::Column::DeletedAt.is_null())
            .order_by_asc(journal_entries::Column::EntryDate)
            .into_tuple::<NaiveDate>()
            .one(&self.db)
            .await?;
        Ok(first)
    }

    async fn lines_for(
        &self,
        entries: Vec<journal_entries::Model>,
    ) -> Result<Vec<LedgerLine>, LedgerRepoError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        let by_id: HashMap<Uuid, journal_entries::Model> =
            entries.into_iter().map(|e| (e.id, e)).collect();

        let mut lines = Vec::new();
        for chunk in ids.chunks(ID_CHUNK) {
            let rows = journal_lines::Entity::find()
                .filter(journal_lines::Column::JournalEntryId.is_in(chunk.to_vec()))
                .order_by_asc(journal_lines::Column::CreatedAt)
                .order_by_asc(journal_lines::Column::Id)
                .all(&self.db)
                .await?;

            lines.extend(rows.into_iter().filter_map(|line| {
                by_id
                    .get(&line.journal_entry_id)
                    .map(|entry| to_line(line, entry))
            }));
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn account_model(account_type: &str, normal_balance: &str) -> chart_of_accounts::Model {
        let now = Utc::now().into();
        chart_of_accounts::Model {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            code: "4000".to_string(),
            name: "Sales".to_string(),
            account_type: account_type.to_string(),
            sub_type: None,
            normal_balance: normal_balance.to_string(),
            opening_balance: dec!(0),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_revenue_rows_map_to_income() {
        let account = to_account(account_model("revenue", "credit")).unwrap();
        assert_eq!(account.account_type, AccountType::Income);
        assert_eq!(account.normal_balance, NormalBalance::Credit);
    }

    #[test]
    fn test_unknown_account_type_is_rejected() {
        let err = to_account(account_model("contra", "credit")).unwrap_err();
        assert!(matches!(
            err,
            LedgerRepoError::InvalidAccount { field: "account_type", .. }
        ));
    }

    #[test]
    fn test_line_falls_back_to_entry_description() {
        let now = Utc::now().into();
        let entry = journal_entries::Model {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            entry_number: "JE-0001".to_string(),
            entry_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            status: "posted".to_string(),
            reference_type: Some("invoice".to_string()),
            reference_id: None,
            description: Some("Invoice INV-1".to_string()),
            is_deleted: false,
            deleted_at: Some(now),
            created_by: None,
            created_at: now,
            updated_at: now,
        };
        let line = journal_lines::Model {
            id: Uuid::new_v4(),
            journal_entry_id: entry.id,
            account_id: Uuid::new_v4(),
            debit_amount: dec!(100),
            credit_amount: dec!(0),
            description: None,
            branch_id: None,
            cost_center_id: None,
            created_at: now,
        };

        let mapped = to_line(line, &entry);
        assert_eq!(mapped.description.as_deref(), Some("Invoice INV-1"));
        assert_eq!(mapped.entry_status, EntryStatus::Posted);
        assert!(mapped.entry_deleted);
        assert!(!mapped.is_reportable());
    }
}
