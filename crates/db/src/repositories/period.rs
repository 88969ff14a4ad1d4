//! Accounting period repository and the write-side lock guard.
//!
//! Lock lookups for reads fail open: a store error is logged and the date is
//! reported unlocked. Lookups on behalf of a write fail closed. Writes that
//! must respect period locks go through [`PeriodRepository::guarded_write`],
//! which evaluates the lock inside the same transaction that performs the
//! mutation.

use chrono::{NaiveDate, Utc};
use futures::future::BoxFuture;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};

use super::audit::AuditRepository;
use crate::entities::accounting_periods;
use kontor_core::auth::MemberRole;
use kontor_core::audit::AuditEvent;
use kontor_core::period::{
    AccountingPeriod, LockCheckMode, LockStatus, PeriodError, PeriodStatus, apply_lock,
    apply_unlock, assert_not_locked, check_lock, check_range_lock, lookup_failure,
    validate_range,
};
use kontor_shared::types::{CompanyId, PeriodId, UserId};

/// Error types for period operations.
#[derive(Debug, thiserror::Error)]
pub enum PeriodRepoError {
    /// Lock rule violation.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// Period not found in the company.
    #[error("Accounting period not found: {0}")]
    NotFound(PeriodId),

    /// Stored status is not one of open, closed or locked.
    #[error("Unknown period status '{status}' on period {period_id}")]
    InvalidStatus {
        /// Offending period.
        period_id: PeriodId,
        /// Stored value.
        status: String,
    },

    /// A guarded write was requested without any dates to guard.
    #[error("Guarded write requires at least one date")]
    NoDates,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

fn to_domain(model: accounting_periods::Model) -> Result<AccountingPeriod, PeriodRepoError> {
    let id = PeriodId::from_uuid(model.id);
    let status = PeriodStatus::parse(&model.status).ok_or_else(|| PeriodRepoError::InvalidStatus {
        period_id: id,
        status: model.status.clone(),
    })?;

    Ok(AccountingPeriod {
        id,
        company_id: CompanyId::from_uuid(model.company_id),
        period_name: model.period_name,
        period_start: model.period_start,
        period_end: model.period_end,
        status,
        is_locked: model.is_locked,
        closed_by: model.closed_by.map(UserId::from_uuid),
        closed_at: model.closed_at.map(|t| t.with_timezone(&Utc)),
    })
}

/// Loads the periods overlapping `[start, end]`.
///
/// With `for_share` the rows are read `FOR SHARE`, so a concurrent lock or
/// unlock waits for the surrounding transaction to finish.
async fn covering_periods<C: ConnectionTrait>(
    conn: &C,
    company_id: CompanyId,
    start: NaiveDate,
    end: NaiveDate,
    for_share: bool,
) -> Result<Vec<AccountingPeriod>, PeriodRepoError> {
    let mut query = accounting_periods::Entity::find()
        .filter(accounting_periods::Column::CompanyId.eq(company_id.into_inner()))
        .filter(accounting_periods::Column::PeriodStart.lte(end))
        .filter(accounting_periods::Column::PeriodEnd.gte(start))
        .order_by_asc(accounting_periods::Column::PeriodStart);

    if for_share {
        query = query.lock_shared();
    }

    query.all(conn).await?.into_iter().map(to_domain).collect()
}

/// Accounting period repository.
#[derive(Debug, Clone)]
pub struct PeriodRepository {
    db: DatabaseConnection,
    max_range_days: u32,
}

impl PeriodRepository {
    /// Creates a new period repository.
    ///
    /// `max_range_days` bounds the day-by-day walk of range checks.
    #[must_use]
    pub const fn new(db: DatabaseConnection, max_range_days: u32) -> Self {
        Self { db, max_range_days }
    }

    /// Lists a company's periods ordered by start date.
    pub async fn list(&self, company_id: CompanyId) -> Result<Vec<AccountingPeriod>, PeriodRepoError> {
        accounting_periods::Entity::find()
            .filter(accounting_periods::Column::CompanyId.eq(company_id.into_inner()))
            .order_by_asc(accounting_periods::Column::PeriodStart)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    /// Returns whether `date` is locked for the company.
    ///
    /// Never fails: lookup errors resolve according to `mode`.
    pub async fn check_lock(
        &self,
        company_id: CompanyId,
        date: NaiveDate,
        mode: LockCheckMode,
    ) -> LockStatus {
        match covering_periods(&self.db, company_id, date, date, false).await {
            Ok(periods) => check_lock(&periods, date),
            Err(e) => {
                warn!(
                    error = %e,
                    company_id = %company_id,
                    %date,
                    ?mode,
                    "Period lock lookup failed"
                );
                lookup_failure(mode, date)
            }
        }
    }

    /// Returns the first locked day in `[start, end]`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted range or one longer than the configured
    /// maximum. Lookup errors resolve according to `mode`.
    pub async fn check_range_lock(
        &self,
        company_id: CompanyId,
        start: NaiveDate,
        end: NaiveDate,
        mode: LockCheckMode,
    ) -> Result<LockStatus, PeriodRepoError> {
        validate_range(start, end, self.max_range_days)?;

        match covering_periods(&self.db, company_id, start, end, false).await {
            Ok(periods) => Ok(check_range_lock(&periods, start, end, self.max_range_days)?),
            Err(e) => {
                warn!(
                    error = %e,
                    company_id = %company_id,
                    %start,
                    %end,
                    ?mode,
                    "Period range lock lookup failed"
                );
                Ok(lookup_failure(mode, start))
            }
        }
    }

    /// Fails if `date` is locked. Lookup errors count as locked.
    ///
    /// Prefer [`Self::guarded_write`] when the write can share the transaction.
    pub async fn assert_not_locked(
        &self,
        company_id: CompanyId,
        date: NaiveDate,
    ) -> Result<(), PeriodRepoError> {
        let status = self.check_lock(company_id, date, LockCheckMode::Write).await;
        if status.locked {
            return Err(PeriodError::PeriodLocked {
                period_name: status.period_name.unwrap_or_else(|| "unknown".to_string()),
                date,
            }
            .into());
        }
        Ok(())
    }

    /// Runs `write` in a transaction that first verifies none of `dates` is locked.
    ///
    /// Covering periods are read `FOR SHARE` inside the transaction, so the
    /// check and the mutation see the same period state. The transaction is
    /// rolled back if the check or the write fails.
    ///
    /// ```ignore
    /// repo.guarded_write(company_id, &[entry_date], |txn| {
    ///     Box::pin(async move { entry.insert(txn).await })
    /// })
    /// .await?;
    /// ```
    pub async fn guarded_write<T, F>(
        &self,
        company_id: CompanyId,
        dates: &[NaiveDate],
        write: F,
    ) -> Result<T, PeriodRepoError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, DbErr>> + Send,
    {
        let (Some(&first), Some(&last)) = (dates.iter().min(), dates.iter().max()) else {
            return Err(PeriodRepoError::NoDates);
        };

        let txn = self.db.begin().await?;

        let periods = match covering_periods(&txn, company_id, first, last, true).await {
            Ok(periods) => periods,
            Err(e) => {
                warn!(
                    error = %e,
                    company_id = %company_id,
                    "Period lookup failed inside guarded write; rejecting"
                );
                txn.rollback().await?;
                return Err(PeriodError::PeriodLocked {
                    period_name: "unknown".to_string(),
                    date: first,
                }
                .into());
            }
        };

        for &date in dates {
            if let Err(e) = assert_not_locked(&periods, date) {
                txn.rollback().await?;
                return Err(e.into());
            }
        }

        let value = write(&txn).await?;
        txn.commit().await?;
        Ok(value)
    }

    /// Closes or locks a period and records the change in the audit log.
    pub async fn lock_period(
        &self,
        company_id: CompanyId,
        period_id: PeriodId,
        actor: UserId,
        role: MemberRole,
        target: PeriodStatus,
    ) -> Result<AccountingPeriod, PeriodRepoError> {
        let txn = self.db.begin().await?;
        let current = Self::find_for_update(&txn, company_id, period_id).await?;
        let updated = apply_lock(&current, role, target, actor, Utc::now())?;
        Self::save(&txn, &updated).await?;
        txn.commit().await?;

        info!(
            company_id = %company_id,
            period_id = %period_id,
            user_id = %actor,
            status = %updated.status,
            "Accounting period locked"
        );
        self.audit_transition(actor, "update", &current, &updated).await;
        Ok(updated)
    }

    /// Reopens a period. Owners only.
    pub async fn unlock_period(
        &self,
        company_id: CompanyId,
        period_id: PeriodId,
        actor: UserId,
        role: MemberRole,
    ) -> Result<AccountingPeriod, PeriodRepoError> {
        let txn = self.db.begin().await?;
        let current = Self::find_for_update(&txn, company_id, period_id).await?;
        let updated = apply_unlock(&current, role)?;
        Self::save(&txn, &updated).await?;
        txn.commit().await?;

        info!(
            company_id = %company_id,
            period_id = %period_id,
            user_id = %actor,
            "Accounting period unlocked"
        );
        self.audit_transition(actor, "update", &current, &updated).await;
        Ok(updated)
    }

    async fn find_for_update(
        txn: &DatabaseTransaction,
        company_id: CompanyId,
        period_id: PeriodId,
    ) -> Result<AccountingPeriod, PeriodRepoError> {
        let model = accounting_periods::Entity::find_by_id(period_id.into_inner())
            .filter(accounting_periods::Column::CompanyId.eq(company_id.into_inner()))
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(PeriodRepoError::NotFound(period_id))?;
        to_domain(model)
    }

    async fn save(txn: &DatabaseTransaction, period: &AccountingPeriod) -> Result<(), DbErr> {
        accounting_periods::ActiveModel {
            id: Set(period.id.into_inner()),
            status: Set(period.status.as_str().to_string()),
            is_locked: Set(period.is_locked),
            closed_by: Set(period.closed_by.map(UserId::into_inner)),
            closed_at: Set(period.closed_at.map(Into::into)),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(txn)
        .await?;
        Ok(())
    }

    async fn audit_transition(
        &self,
        actor: UserId,
        verb: &str,
        before: &AccountingPeriod,
        after: &AccountingPeriod,
    ) {
        let event = AuditEvent::new(
            after.company_id,
            actor,
            verb,
            "accounting_periods",
            after.id.to_string(),
        )
        .map(|e| {
            e.with_identifier(after.period_name.clone()).with_data(
                serde_json::to_value(before).ok(),
                serde_json::to_value(after).ok(),
            )
        });

        match event {
            Ok(event) => {
                AuditRepository::new(self.db.clone()).log_event(&event).await;
            }
            Err(e) => warn!(error = %e, period_id = %after.id, "Could not build audit event"),
        }
    }
}
