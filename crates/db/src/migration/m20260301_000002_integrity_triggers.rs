//! Store-level integrity triggers.
//!
//! - `audit_logs` rejects UPDATE; INSERT and DELETE remain allowed.
//! - `journal_entries` and `journal_lines` reject writes dated inside a closed
//!   or locked accounting period, for both the old and the new row.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(AUDIT_IMMUTABILITY_SQL).await?;
        db.execute_unprepared(PERIOD_LOCK_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_TRIGGERS_SQL).await?;
        Ok(())
    }
}

const AUDIT_IMMUTABILITY_SQL: &str = r"
CREATE OR REPLACE FUNCTION prevent_audit_log_update()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'Audit log entries are immutable';
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_prevent_audit_log_update
BEFORE UPDATE ON audit_logs
FOR EACH ROW
EXECUTE FUNCTION prevent_audit_log_update();
";

const PERIOD_LOCK_SQL: &str = r"
CREATE OR REPLACE FUNCTION locked_period_name(p_company_id UUID, p_date DATE)
RETURNS TEXT AS $$
    SELECT ap.period_name
    FROM accounting_periods ap
    WHERE ap.company_id = p_company_id
      AND ap.period_start <= p_date
      AND ap.period_end >= p_date
      AND (ap.is_locked OR ap.status IN ('closed', 'locked'))
    ORDER BY ap.period_start
    LIMIT 1;
$$ LANGUAGE sql STABLE;

CREATE OR REPLACE FUNCTION enforce_period_lock()
RETURNS TRIGGER AS $$
DECLARE
    locked_name TEXT;
BEGIN
    IF TG_OP IN ('UPDATE', 'DELETE') THEN
        locked_name := locked_period_name(OLD.company_id, OLD.entry_date);
        IF locked_name IS NOT NULL THEN
            RAISE EXCEPTION 'Period % is locked', locked_name;
        END IF;
    END IF;

    IF TG_OP IN ('INSERT', 'UPDATE') THEN
        locked_name := locked_period_name(NEW.company_id, NEW.entry_date);
        IF locked_name IS NOT NULL THEN
            RAISE EXCEPTION 'Period % is locked', locked_name;
        END IF;
        RETURN NEW;
    END IF;

    RETURN OLD;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_enforce_period_lock
BEFORE INSERT OR UPDATE OR DELETE ON journal_entries
FOR EACH ROW
EXECUTE FUNCTION enforce_period_lock();

CREATE OR REPLACE FUNCTION enforce_line_period_lock()
RETURNS TRIGGER AS $$
DECLARE
    entry_company UUID;
    entry_day DATE;
    locked_name TEXT;
BEGIN
    SELECT je.company_id, je.entry_date INTO entry_company, entry_day
    FROM journal_entries je
    WHERE je.id = CASE WHEN TG_OP = 'DELETE' THEN OLD.journal_entry_id ELSE NEW.journal_entry_id END;

    IF entry_company IS NOT NULL THEN
        locked_name := locked_period_name(entry_company, entry_day);
        IF locked_name IS NOT NULL THEN
            RAISE EXCEPTION 'Period % is locked', locked_name;
        END IF;
    END IF;

    IF TG_OP = 'DELETE' THEN
        RETURN OLD;
    END IF;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_enforce_line_period_lock
BEFORE INSERT OR UPDATE OR DELETE ON journal_lines
FOR EACH ROW
EXECUTE FUNCTION enforce_line_period_lock();
";

const DROP_TRIGGERS_SQL: &str = r"
DROP TRIGGER IF EXISTS trg_enforce_line_period_lock ON journal_lines;
DROP TRIGGER IF EXISTS trg_enforce_period_lock ON journal_entries;
DROP TRIGGER IF EXISTS trg_prevent_audit_log_update ON audit_logs;
DROP FUNCTION IF EXISTS enforce_line_period_lock();
DROP FUNCTION IF EXISTS enforce_period_lock();
DROP FUNCTION IF EXISTS locked_period_name(UUID, DATE);
DROP FUNCTION IF EXISTS prevent_audit_log_update();
";
