//! Detection of journal entries whose debits and credits disagree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use kontor_shared::types::{JournalEntryId, approx_eq};

use super::types::LedgerLine;

/// A posted entry whose lines do not balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnbalancedEntry {
    /// Entry ID.
    pub entry_id: JournalEntryId,
    /// Entry number.
    pub entry_number: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Sum of debit amounts.
    pub total_debit: Decimal,
    /// Sum of credit amounts.
    pub total_credit: Decimal,
    /// `total_debit - total_credit`.
    pub difference: Decimal,
}

/// Returns every reportable entry in `lines` whose debits and credits differ
/// by at least the materiality threshold, ordered by date then entry number.
///
/// `lines` must contain all lines of each entry; entries with lines missing
/// from the input would be flagged spuriously.
#[must_use]
pub fn find_unbalanced_entries(lines: &[LedgerLine]) -> Vec<UnbalancedEntry> {
    let mut entries: BTreeMap<(NaiveDate, &str, JournalEntryId), (Decimal, Decimal)> =
        BTreeMap::new();

    for line in lines.iter().filter(|l| l.is_reportable()) {
        let totals = entries
            .entry((line.entry_date, line.entry_number.as_str(), line.entry_id))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        totals.0 += line.debit;
        totals.1 += line.credit;
    }

    entries
        .into_iter()
        .filter(|(_, (debit, credit))| !approx_eq(*debit, *credit))
        .map(|((entry_date, entry_number, entry_id), (debit, credit))| UnbalancedEntry {
            entry_id,
            entry_number: entry_number.to_string(),
            entry_date,
            total_debit: debit,
            total_credit: credit,
            difference: debit - credit,
        })
        .collect()
}
