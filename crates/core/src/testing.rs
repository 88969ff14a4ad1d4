//! Fixture builders shared by unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;
use kontor_shared::types::{AccountId, JournalEntryId};

use crate::ledger::{Account, AccountType, EntryStatus, LedgerLine};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn account(code: &str, name: &str, account_type: AccountType, sub_type: Option<&str>) -> Account {
    Account {
        id: AccountId::new(),
        code: code.to_string(),
        name: name.to_string(),
        account_type,
        sub_type: sub_type.map(str::to_string),
        normal_balance: account_type.normal_balance(),
        opening_balance: Decimal::ZERO,
        is_active: true,
    }
}

/// A posted journal entry under construction.
pub struct EntryBuilder {
    id: JournalEntryId,
    number: String,
    date: NaiveDate,
    status: EntryStatus,
    deleted: bool,
    reference_type: Option<String>,
    reference_id: Option<Uuid>,
    lines: Vec<LedgerLine>,
}

pub fn entry(number: &str, date: NaiveDate) -> EntryBuilder {
    EntryBuilder {
        id: JournalEntryId::new(),
        number: number.to_string(),
        date,
        status: EntryStatus::Posted,
        deleted: false,
        reference_type: None,
        reference_id: None,
        lines: Vec::new(),
    }
}

impl EntryBuilder {
    pub fn reference(mut self, reference_type: &str, reference_id: Option<Uuid>) -> Self {
        self.reference_type = Some(reference_type.to_string());
        self.reference_id = reference_id;
        self
    }

    pub fn status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    pub fn debit(self, account: &Account, amount: Decimal) -> Self {
        self.line(account, amount, Decimal::ZERO, None)
    }

    pub fn credit(self, account: &Account, amount: Decimal) -> Self {
        self.line(account, Decimal::ZERO, amount, None)
    }

    pub fn line(
        mut self,
        account: &Account,
        debit: Decimal,
        credit: Decimal,
        branch_id: Option<Uuid>,
    ) -> Self {
        self.lines.push(LedgerLine {
            line_id: Uuid::new_v4(),
            entry_id: self.id,
            entry_number: self.number.clone(),
            entry_date: self.date,
            entry_status: self.status,
            entry_deleted: self.deleted,
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            description: Some(format!("{} line", self.number)),
            account_id: account.id,
            debit,
            credit,
            branch_id,
            cost_center_id: None,
        });
        self
    }

    pub fn build(self) -> Vec<LedgerLine> {
        self.lines
            .into_iter()
            .map(|line| LedgerLine {
                entry_status: self.status,
                entry_deleted: self.deleted,
                reference_type: self.reference_type.clone(),
                reference_id: self.reference_id,
                ..line
            })
            .collect()
    }
}
