//! Tests for cash flow classification and statement assembly.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::ledger::{AccountType, LedgerLine};
use crate::reports::DateRange;
use crate::testing::{account, date, entry};

fn january() -> DateRange {
    DateRange::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap()
}

#[rstest]
#[case("invoice_payment", CashFlowCategory::Operating)]
#[case("bill_payment", CashFlowCategory::Operating)]
#[case("Payroll", CashFlowCategory::Operating)]
#[case("salary", CashFlowCategory::Operating)]
#[case("asset_purchase", CashFlowCategory::Investing)]
#[case("DEPRECIATION", CashFlowCategory::Investing)]
#[case("loan_repayment", CashFlowCategory::Financing)]
#[case("dividend", CashFlowCategory::Financing)]
#[case("owner_contribution", CashFlowCategory::Financing)]
#[case("Asset-Purchase", CashFlowCategory::Investing)]
#[case("sales tax payment", CashFlowCategory::Operating)]
#[case("taxes", CashFlowCategory::Operating)]
#[case("unknown_xyz", CashFlowCategory::Other)]
#[case("", CashFlowCategory::Other)]
fn test_classify_examples(#[case] reference_type: &str, #[case] expected: CashFlowCategory) {
    assert_eq!(classify(Some(reference_type)), expected);
}

#[test]
fn test_missing_reference_type_is_other() {
    assert_eq!(classify(None), CashFlowCategory::Other);
}

#[test]
fn test_earlier_rule_wins_on_overlap() {
    // Matches "vat" (operating) and "loan" (financing).
    assert_eq!(classify(Some("vat_loan_adjustment")), CashFlowCategory::Operating);
    // Matches "equipment" (investing) and "loan" (financing).
    assert_eq!(classify(Some("equipment_loan")), CashFlowCategory::Investing);
}

#[rstest]
#[case("private_placement")]
#[case("renovation")]
#[case("syntax_fix")]
fn test_short_keywords_do_not_match_inside_words(#[case] reference_type: &str) {
    assert_eq!(classify(Some(reference_type)), CashFlowCategory::Other);
}

#[test]
fn test_rules_are_evaluated_in_statement_order() {
    let order: Vec<CashFlowCategory> = CLASSIFICATION_RULES.iter().map(|r| r.category).collect();
    assert_eq!(
        order,
        vec![
            CashFlowCategory::Operating,
            CashFlowCategory::Investing,
            CashFlowCategory::Financing,
        ]
    );
}

#[test]
fn test_january_cash_flow() {
    let bank = account("1100", "Bank", AccountType::Asset, Some("bank"));
    let revenue = account("4000", "Sales Revenue", AccountType::Income, None);
    let expense = account("6100", "Salaries", AccountType::Expense, None);
    let accounts = vec![bank.clone(), revenue.clone(), expense.clone()];

    let mut lines = entry("JE-0001", date(2026, 1, 10))
        .reference("invoice_payment", None)
        .debit(&bank, dec!(1000))
        .credit(&revenue, dec!(1000))
        .build();
    lines.extend(
        entry("JE-0002", date(2026, 1, 15))
            .reference("salary", None)
            .debit(&expense, dec!(400))
            .credit(&bank, dec!(400))
            .build(),
    );

    let statement = build_cash_flow(&accounts, &lines, january());

    assert_eq!(statement.operating.items.len(), 2);
    assert_eq!(statement.operating.items[0].amount, dec!(1000));
    assert_eq!(statement.operating.items[1].amount, dec!(-400));
    assert_eq!(statement.operating.total, dec!(600));
    assert!(statement.investing.items.is_empty());
    assert_eq!(statement.net_cash_flow, dec!(600));
    assert_eq!(statement.opening_cash, dec!(0));
    assert_eq!(statement.closing_cash, dec!(600));
}

#[test]
fn test_deactivated_bank_account_still_moves_cash() {
    let mut bank = account("1100", "Bank", AccountType::Asset, Some("bank"));
    bank.is_active = false;
    let revenue = account("4000", "Sales Revenue", AccountType::Income, None);
    let accounts = vec![bank.clone(), revenue.clone()];

    let lines = entry("JE-0001", date(2026, 1, 10))
        .reference("invoice_payment", None)
        .debit(&bank, dec!(1000))
        .credit(&revenue, dec!(1000))
        .build();

    let statement = build_cash_flow(&accounts, &lines, january());
    assert_eq!(statement.operating.total, dec!(1000));
    assert_eq!(statement.closing_cash, dec!(1000));
}

#[test]
fn test_transfers_between_cash_accounts_net_out() {
    let bank = account("1100", "Bank", AccountType::Asset, Some("bank"));
    let petty = account("1000", "Petty Cash", AccountType::Asset, Some("CASH"));
    let accounts = vec![bank.clone(), petty.clone()];

    let lines = entry("JE-0001", date(2026, 1, 5))
        .reference("transfer", None)
        .debit(&petty, dec!(200))
        .credit(&bank, dec!(200))
        .build();

    let statement = build_cash_flow(&accounts, &lines, january());
    assert!(statement.other.items.is_empty());
    assert_eq!(statement.net_cash_flow, dec!(0));
}

#[test]
fn test_opening_cash_uses_prior_lines() {
    let mut bank = account("1100", "Bank", AccountType::Asset, Some("bank"));
    bank.opening_balance = dec!(100);
    let loan = account("2500", "Bank Loan", AccountType::Liability, None);
    let accounts = vec![bank.clone(), loan.clone()];

    let mut lines = entry("JE-0001", date(2025, 12, 1))
        .reference("loan", None)
        .debit(&bank, dec!(5000))
        .credit(&loan, dec!(5000))
        .build();
    lines.extend(
        entry("JE-0002", date(2026, 1, 31))
            .reference("loan_repayment", None)
            .debit(&loan, dec!(250))
            .credit(&bank, dec!(250))
            .build(),
    );

    let statement = build_cash_flow(&accounts, &lines, january());
    assert_eq!(statement.opening_cash, dec!(5100));
    assert_eq!(statement.financing.total, dec!(-250));
    assert_eq!(statement.closing_cash, dec!(4850));
}

proptest! {
    /// Classification is a pure function of its input.
    #[test]
    fn prop_classification_is_deterministic(a in "[a-zA-Z_]{0,24}", b in "[a-zA-Z_]{0,24}") {
        let first_a = classify(Some(a.as_str()));
        let first_b = classify(Some(b.as_str()));
        prop_assert_eq!(classify(Some(b.as_str())), first_b);
        prop_assert_eq!(classify(Some(a.as_str())), first_a);
        prop_assert_eq!(classify(Some(a.to_uppercase().as_str())), first_a);
    }

    /// Net cash flow equals the section totals and the retained entry deltas.
    #[test]
    fn prop_net_cash_flow_is_conserved(
        spec in prop::collection::vec(
            (0i64..31, -2_000_000i64..2_000_000, 0usize..5),
            0..40,
        )
    ) {
        let bank = account("1100", "Bank", AccountType::Asset, Some("bank"));
        let counter = account("9000", "Clearing", AccountType::Equity, None);
        let accounts = vec![bank.clone(), counter.clone()];
        let references = ["invoice", "asset_purchase", "loan", "misc", "dividend"];

        let lines: Vec<LedgerLine> = spec
            .iter()
            .enumerate()
            .flat_map(|(i, &(day, cents, r))| {
                let amount = Decimal::new(cents.abs(), 3);
                let builder = entry(&format!("JE-{i:04}"), date(2026, 1, 1) + chrono::Duration::days(day))
                    .reference(references[r], None);
                if cents >= 0 {
                    builder.debit(&bank, amount).credit(&counter, amount).build()
                } else {
                    builder.debit(&counter, amount).credit(&bank, amount).build()
                }
            })
            .collect();

        let statement = build_cash_flow(&accounts, &lines, january());

        let sections: Decimal = CashFlowCategory::ALL
            .iter()
            .map(|c| statement.section(*c).total)
            .sum();
        let retained: Decimal = spec
            .iter()
            .map(|&(_, cents, _)| Decimal::new(cents, 3))
            .filter(|d| d.abs() >= dec!(0.01))
            .sum();

        prop_assert_eq!(statement.net_cash_flow, sections);
        prop_assert_eq!(statement.net_cash_flow, retained);
        prop_assert!(
            CashFlowCategory::ALL
                .iter()
                .flat_map(|c| &statement.section(*c).items)
                .all(|i| i.amount.abs() >= dec!(0.01))
        );
    }
}
