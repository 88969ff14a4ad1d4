//! Trial balance derivation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use kontor_shared::types::{AccountId, approx_eq};

use super::types::{DateRange, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals};
use crate::ledger::{Account, LedgerLine, find_unbalanced_entries};

/// Builds the trial balance for `range`.
///
/// Rows cover every account with at least one reportable in-range line,
/// including deactivated accounts, so the totals see every posted line.
/// Entries whose own lines do not balance are reported in
/// `unbalanced_entries` and still counted in the totals, so an unbalanced
/// entry shows up both there and as `is_balanced = false`.
#[must_use]
pub fn build_trial_balance(
    accounts: &[Account],
    lines: &[LedgerLine],
    range: DateRange,
) -> TrialBalanceReport {
    let in_range: Vec<LedgerLine> = lines
        .iter()
        .filter(|l| l.is_reportable() && range.contains(l.entry_date))
        .cloned()
        .collect();

    let mut sums: HashMap<AccountId, (Decimal, Decimal)> = HashMap::new();
    for line in &in_range {
        let totals = sums
            .entry(line.account_id)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        totals.0 += line.debit;
        totals.1 += line.credit;
    }

    let mut rows: Vec<TrialBalanceRow> = accounts
        .iter()
        .filter_map(|account| {
            sums.get(&account.id).map(|(debit, credit)| TrialBalanceRow {
                account_id: account.id,
                account_code: account.code.clone(),
                account_name: account.name.clone(),
                account_type: account.account_type,
                total_debit: *debit,
                total_credit: *credit,
                balance: *debit - *credit,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.account_code.cmp(&b.account_code));

    let total_debit: Decimal = rows.iter().map(|r| r.total_debit).sum();
    let total_credit: Decimal = rows.iter().map(|r| r.total_credit).sum();

    TrialBalanceReport {
        accounts: rows,
        period: range,
        totals: TrialBalanceTotals {
            total_debit,
            total_credit,
            difference: total_debit - total_credit,
            is_balanced: approx_eq(total_debit, total_credit),
        },
        unbalanced_entries: find_unbalanced_entries(&in_range),
    }
}
