//! General ledger derivation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use kontor_shared::types::{AccountId, approx_eq, is_material};

use super::error::ReportError;
use super::types::{
    AccountLedger, DateRange, GeneralLedgerReport, GeneralLedgerSummary, LedgerTransaction,
};
use crate::ledger::{Account, LedgerLine, LineFilter};

/// Builds the general ledger for `range`.
///
/// `lines` should hold every line of the company's accounts dated on or before
/// `range.to`; lines dated before `range.from` feed the opening balance, and
/// unreportable or filtered-out lines are skipped. Inactive accounts appear
/// only while they hold reportable lines up to `range.to`. Accounts with no
/// in-range lines and immaterial opening and closing balances are left out.
///
/// # Errors
///
/// Returns `AccountNotFound` if the filter names an account that is not in
/// `accounts`, or is inactive with no reportable lines.
pub fn build_general_ledger(
    accounts: &[Account],
    lines: &[LedgerLine],
    range: DateRange,
    filter: &LineFilter,
) -> Result<GeneralLedgerReport, ReportError> {
    let mut by_account: HashMap<AccountId, Vec<&LedgerLine>> = HashMap::new();
    for line in lines
        .iter()
        .filter(|l| l.is_reportable() && l.entry_date <= range.to && filter.matches(l))
    {
        by_account.entry(line.account_id).or_default().push(line);
    }

    let mut selected: Vec<&Account> = accounts
        .iter()
        .filter(|a| a.is_reported(by_account.contains_key(&a.id)))
        .filter(|a| filter.account_id.is_none_or(|id| a.id == id))
        .collect();

    if let Some(account_id) = filter.account_id.filter(|_| selected.is_empty()) {
        return Err(ReportError::AccountNotFound(account_id));
    }

    selected.sort_by(|a, b| a.code.cmp(&b.code));

    let ledgers: Vec<AccountLedger> = selected
        .into_iter()
        .map(|account| {
            let account_lines = by_account.remove(&account.id).unwrap_or_default();
            account_ledger(account, account_lines, range)
        })
        .filter(|ledger| {
            ledger.transaction_count > 0
                || is_material(ledger.opening_balance)
                || is_material(ledger.closing_balance)
        })
        .collect();

    let total_debit: Decimal = ledgers.iter().map(|l| l.total_debit).sum();
    let total_credit: Decimal = ledgers.iter().map(|l| l.total_credit).sum();
    let summary = GeneralLedgerSummary {
        total_debit,
        total_credit,
        account_count: ledgers.len(),
        transaction_count: ledgers.iter().map(|l| l.transaction_count).sum(),
        is_balanced: approx_eq(total_debit, total_credit),
    };

    Ok(GeneralLedgerReport {
        accounts: ledgers,
        period: range,
        summary,
    })
}

fn account_ledger(account: &Account, mut lines: Vec<&LedgerLine>, range: DateRange) -> AccountLedger {
    // Stable: lines sharing a date keep their load order.
    lines.sort_by_key(|l| l.entry_date);

    let opening_balance = account.opening_balance
        + lines
            .iter()
            .filter(|l| l.entry_date < range.from)
            .map(|l| l.net())
            .sum::<Decimal>();

    let mut balance = opening_balance;
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    let transactions: Vec<LedgerTransaction> = lines
        .into_iter()
        .filter(|l| range.contains(l.entry_date))
        .map(|line| {
            balance += line.net();
            total_debit += line.debit;
            total_credit += line.credit;
            LedgerTransaction {
                date: line.entry_date,
                entry_number: line.entry_number.clone(),
                description: line.description.clone(),
                reference_type: line.reference_type.clone(),
                debit: line.debit,
                credit: line.credit,
                balance,
            }
        })
        .collect();

    AccountLedger {
        account_id: account.id,
        account_code: account.code.clone(),
        account_name: account.name.clone(),
        account_type: account.account_type,
        sub_type: account.sub_type.clone(),
        opening_balance,
        transaction_count: transactions.len(),
        transactions,
        closing_balance: balance,
        total_debit,
        total_credit,
    }
}
