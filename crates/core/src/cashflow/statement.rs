//! Cash flow statement assembly.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use kontor_shared::types::{AccountId, JournalEntryId, is_material};

use super::classify::{CashFlowCategory, classify};
use crate::ledger::{Account, LedgerLine};
use crate::reports::DateRange;

/// Account sub-types that hold cash.
pub const CASH_SUB_TYPES: [&str; 2] = ["cash", "bank"];

/// One entry's net effect on cash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowItem {
    /// Entry ID.
    pub entry_id: JournalEntryId,
    /// Entry number.
    pub entry_number: String,
    /// Entry date.
    pub date: NaiveDate,
    /// Description of the first cash line.
    pub description: Option<String>,
    /// Source document category.
    pub reference_type: Option<String>,
    /// Net debit minus credit across the entry's cash lines.
    pub amount: Decimal,
}

/// A statement section and its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSection {
    /// Section.
    pub category: CashFlowCategory,
    /// Entries classified here, in date order.
    pub items: Vec<CashFlowItem>,
    /// Sum of item amounts.
    pub total: Decimal,
}

impl CashFlowSection {
    fn empty(category: CashFlowCategory) -> Self {
        Self {
            category,
            items: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    fn push(&mut self, item: CashFlowItem) {
        self.total += item.amount;
        self.items.push(item);
    }
}

/// Cash flow statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Reporting range.
    pub period: DateRange,
    /// Operating activities.
    pub operating: CashFlowSection,
    /// Investing activities.
    pub investing: CashFlowSection,
    /// Financing activities.
    pub financing: CashFlowSection,
    /// Unclassified movements.
    pub other: CashFlowSection,
    /// Sum of the four section totals.
    pub net_cash_flow: Decimal,
    /// Cash balance before the range.
    pub opening_cash: Decimal,
    /// `opening_cash + net_cash_flow`.
    pub closing_cash: Decimal,
}

impl CashFlowStatement {
    /// Returns the section for `category`.
    #[must_use]
    pub const fn section(&self, category: CashFlowCategory) -> &CashFlowSection {
        match category {
            CashFlowCategory::Operating => &self.operating,
            CashFlowCategory::Investing => &self.investing,
            CashFlowCategory::Financing => &self.financing,
            CashFlowCategory::Other => &self.other,
        }
    }

    fn section_mut(&mut self, category: CashFlowCategory) -> &mut CashFlowSection {
        match category {
            CashFlowCategory::Operating => &mut self.operating,
            CashFlowCategory::Investing => &mut self.investing,
            CashFlowCategory::Financing => &mut self.financing,
            CashFlowCategory::Other => &mut self.other,
        }
    }
}

/// Builds the cash flow statement for `range`.
///
/// Only lines on accounts tagged `cash` or `bank` count, active or not. Each posted
/// entry in range becomes one item whose amount is the sum of `debit - credit`
/// over its cash lines; entries with an immaterial net are dropped. Lines
/// before the range feed `opening_cash`.
#[must_use]
pub fn build_cash_flow(
    accounts: &[Account],
    lines: &[LedgerLine],
    range: DateRange,
) -> CashFlowStatement {
    let cash_ids: HashSet<AccountId> = accounts
        .iter()
        .filter(|a| a.has_sub_type(&CASH_SUB_TYPES))
        .map(|a| a.id)
        .collect();
    let has_activity: HashSet<AccountId> = lines
        .iter()
        .filter(|l| l.is_reportable() && l.entry_date <= range.to)
        .map(|l| l.account_id)
        .collect();
    let cash_accounts: Vec<&Account> = accounts
        .iter()
        .filter(|a| cash_ids.contains(&a.id) && a.is_reported(has_activity.contains(&a.id)))
        .collect();

    let cash_lines = lines
        .iter()
        .filter(|l| l.is_reportable() && cash_ids.contains(&l.account_id));

    let mut opening_cash: Decimal = cash_accounts.iter().map(|a| a.opening_balance).sum();
    let mut per_entry: BTreeMap<(NaiveDate, &str, JournalEntryId), CashFlowItem> = BTreeMap::new();

    for line in cash_lines {
        if line.entry_date < range.from {
            opening_cash += line.net();
            continue;
        }
        if line.entry_date > range.to {
            continue;
        }

        per_entry
            .entry((line.entry_date, line.entry_number.as_str(), line.entry_id))
            .or_insert_with(|| CashFlowItem {
                entry_id: line.entry_id,
                entry_number: line.entry_number.clone(),
                date: line.entry_date,
                description: line.description.clone(),
                reference_type: line.reference_type.clone(),
                amount: Decimal::ZERO,
            })
            .amount += line.net();
    }

    let mut statement = CashFlowStatement {
        period: range,
        operating: CashFlowSection::empty(CashFlowCategory::Operating),
        investing: CashFlowSection::empty(CashFlowCategory::Investing),
        financing: CashFlowSection::empty(CashFlowCategory::Financing),
        other: CashFlowSection::empty(CashFlowCategory::Other),
        net_cash_flow: Decimal::ZERO,
        opening_cash,
        closing_cash: opening_cash,
    };

    for item in per_entry.into_values().filter(|i| is_material(i.amount)) {
        let category = classify(item.reference_type.as_deref());
        statement.section_mut(category).push(item);
    }

    statement.net_cash_flow = CashFlowCategory::ALL
        .iter()
        .map(|c| statement.section(*c).total)
        .sum();
    statement.closing_cash = opening_cash + statement.net_cash_flow;

    statement
}
