//! Income statement and balance sheet aggregation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use kontor_shared::types::{AccountId, approx_eq, round_amount, round_percent};

use crate::ledger::{Account, AccountType, LedgerLine};
use crate::reports::DateRange;

/// Expense sub-types routed to cost of goods sold.
pub const COGS_SUB_TYPES: [&str; 2] = ["cogs", "cost_of_goods_sold"];

/// Account code treated as cost of goods sold regardless of sub-type.
pub const COGS_ACCOUNT_CODE: &str = "5000";

/// Number of accounts in each top list.
pub const TOP_ACCOUNTS: usize = 5;

/// An account and its amount over the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAmount {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Amount on the account's natural side.
    pub amount: Decimal,
}

/// Dashboard figures for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Summary range.
    pub period: DateRange,
    /// Income, `credit - debit`.
    pub revenue: Decimal,
    /// Cost of goods sold.
    pub cogs: Decimal,
    /// `revenue - cogs`.
    pub gross_profit: Decimal,
    /// Expenses other than cost of goods sold.
    pub operating_expenses: Decimal,
    /// `gross_profit - operating_expenses`.
    pub net_profit: Decimal,
    /// `net_profit / revenue * 100`, zero without revenue.
    pub profit_margin: Decimal,
    /// Asset movement, `debit - credit`.
    pub total_assets: Decimal,
    /// Liability movement, `credit - debit`.
    pub total_liabilities: Decimal,
    /// Equity movement, `credit - debit`.
    pub total_equity: Decimal,
    /// Whether assets equal liabilities, equity and net profit within materiality.
    pub is_balanced: bool,
    /// Largest revenue accounts by magnitude.
    pub top_revenue_accounts: Vec<AccountAmount>,
    /// Largest expense accounts by magnitude.
    pub top_expense_accounts: Vec<AccountAmount>,
    /// Journal lines folded into the summary.
    pub line_count: usize,
}

impl DashboardSummary {
    /// Rounds amounts to 2 places and the margin to 1 place.
    ///
    /// Call this once at the response boundary; accumulation stays exact.
    #[must_use]
    pub fn rounded(self) -> Self {
        let round_list = |list: Vec<AccountAmount>| -> Vec<AccountAmount> {
            list.into_iter()
                .map(|a| AccountAmount {
                    amount: round_amount(a.amount),
                    ..a
                })
                .collect()
        };

        Self {
            revenue: round_amount(self.revenue),
            cogs: round_amount(self.cogs),
            gross_profit: round_amount(self.gross_profit),
            operating_expenses: round_amount(self.operating_expenses),
            net_profit: round_amount(self.net_profit),
            profit_margin: round_percent(self.profit_margin),
            total_assets: round_amount(self.total_assets),
            total_liabilities: round_amount(self.total_liabilities),
            total_equity: round_amount(self.total_equity),
            top_revenue_accounts: round_list(self.top_revenue_accounts),
            top_expense_accounts: round_list(self.top_expense_accounts),
            ..self
        }
    }
}

fn is_cogs(account: &Account) -> bool {
    account.has_sub_type(&COGS_SUB_TYPES) || account.code == COGS_ACCOUNT_CODE
}

fn top_accounts(
    breakdown: HashMap<AccountId, Decimal>,
    accounts: &HashMap<AccountId, &Account>,
) -> Vec<AccountAmount> {
    let mut list: Vec<AccountAmount> = breakdown
        .into_iter()
        .filter_map(|(id, amount)| {
            accounts.get(&id).map(|a| AccountAmount {
                account_id: id,
                account_code: a.code.clone(),
                account_name: a.name.clone(),
                amount,
            })
        })
        .collect();

    list.sort_by(|a, b| {
        b.amount
            .abs()
            .cmp(&a.amount.abs())
            .then_with(|| a.account_code.cmp(&b.account_code))
    });
    list.truncate(TOP_ACCOUNTS);
    list
}

/// Folds reportable in-range lines into dashboard figures.
///
/// Deactivated accounts count like any other while they hold lines; lines
/// on accounts missing from `accounts` are ignored. Results are not
/// rounded; see [`DashboardSummary::rounded`].
#[must_use]
pub fn summarize(accounts: &[Account], lines: &[LedgerLine], range: DateRange) -> DashboardSummary {
    let by_id: HashMap<AccountId, &Account> = accounts.iter().map(|a| (a.id, a)).collect();

    let mut revenue = Decimal::ZERO;
    let mut cogs = Decimal::ZERO;
    let mut operating_expenses = Decimal::ZERO;
    let mut total_assets = Decimal::ZERO;
    let mut total_liabilities = Decimal::ZERO;
    let mut total_equity = Decimal::ZERO;
    let mut revenue_breakdown: HashMap<AccountId, Decimal> = HashMap::new();
    let mut expense_breakdown: HashMap<AccountId, Decimal> = HashMap::new();
    let mut line_count = 0;

    for line in lines
        .iter()
        .filter(|l| l.is_reportable() && range.contains(l.entry_date))
    {
        let Some(account) = by_id.get(&line.account_id) else {
            continue;
        };
        line_count += 1;

        match account.account_type {
            AccountType::Income => {
                let amount = line.credit - line.debit;
                revenue += amount;
                *revenue_breakdown.entry(account.id).or_default() += amount;
            }
            AccountType::Expense => {
                let amount = line.net();
                if is_cogs(account) {
                    cogs += amount;
                } else {
                    operating_expenses += amount;
                }
                *expense_breakdown.entry(account.id).or_default() += amount;
            }
            AccountType::Asset => total_assets += line.net(),
            AccountType::Liability => total_liabilities -= line.net(),
            AccountType::Equity => total_equity -= line.net(),
        }
    }

    let gross_profit = revenue - cogs;
    let net_profit = gross_profit - operating_expenses;
    let profit_margin = if revenue.is_zero() {
        Decimal::ZERO
    } else {
        net_profit
            .checked_div(revenue)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    };

    DashboardSummary {
        period: range,
        revenue,
        cogs,
        gross_profit,
        operating_expenses,
        net_profit,
        profit_margin,
        total_assets,
        total_liabilities,
        total_equity,
        is_balanced: approx_eq(total_assets, total_liabilities + total_equity + net_profit),
        top_revenue_accounts: top_accounts(revenue_breakdown, &by_id),
        top_expense_accounts: top_accounts(expense_breakdown, &by_id),
        line_count,
    }
}
