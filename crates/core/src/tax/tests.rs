//! Tests for the VAT registers.

use rstest::rstest;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::*;
use crate::ledger::{Account, AccountType, EntryStatus, LedgerLine};
use crate::reports::DateRange;
use crate::testing::{account, date, entry};

struct Fixture {
    accounts: Vec<Account>,
    lines: Vec<LedgerLine>,
    documents: Vec<TaxDocument>,
    paid_bill: Uuid,
    sent_bill: Uuid,
    invoice: Uuid,
}

fn document(id: Uuid, number: &str, status: &str) -> TaxDocument {
    TaxDocument {
        id,
        number: number.to_string(),
        counterparty: Some("Acme Supplies".to_string()),
        document_date: date(2026, 1, 3),
        subtotal: dec!(1000),
        status: status.to_string(),
    }
}

fn fixture() -> Fixture {
    let vat_in = account("1400", "VAT Input", AccountType::Asset, Some("vat_input"));
    let vat_out = account("2400", "VAT Output", AccountType::Liability, Some("VAT_PAYABLE"));
    let payable = account("2100", "Accounts Payable", AccountType::Liability, None);
    let receivable = account("1300", "Accounts Receivable", AccountType::Asset, None);
    let stock = account("1500", "Inventory", AccountType::Asset, Some("inventory"));
    let sales = account("4000", "Sales", AccountType::Income, None);

    let paid_bill = Uuid::new_v4();
    let sent_bill = Uuid::new_v4();
    let invoice = Uuid::new_v4();

    let mut lines = entry("JE-0001", date(2026, 1, 5))
        .reference("bill", Some(paid_bill))
        .debit(&stock, dec!(1000))
        .debit(&vat_in, dec!(110))
        .credit(&payable, dec!(1110))
        .build();
    lines.extend(
        entry("JE-0002", date(2026, 1, 8))
            .reference("bill", Some(sent_bill))
            .debit(&stock, dec!(500))
            .debit(&vat_in, dec!(30))
            .debit(&vat_in, dec!(25))
            .credit(&payable, dec!(555))
            .build(),
    );
    lines.extend(
        entry("JE-0003", date(2026, 1, 9))
            .reference("invoice", Some(invoice))
            .debit(&receivable, dec!(2220))
            .credit(&sales, dec!(2000))
            .credit(&vat_out, dec!(220))
            .build(),
    );
    // VAT settlement clears the input account: not a bill, never in the register.
    lines.extend(
        entry("JE-0004", date(2026, 1, 31))
            .reference("vat_settlement", None)
            .debit(&vat_out, dec!(165))
            .credit(&vat_in, dec!(165))
            .build(),
    );
    // Draft bill.
    lines.extend(
        entry("JE-0005", date(2026, 1, 20))
            .reference("bill", Some(Uuid::new_v4()))
            .status(EntryStatus::Draft)
            .debit(&vat_in, dec!(99))
            .credit(&payable, dec!(99))
            .build(),
    );

    Fixture {
        accounts: vec![vat_in, vat_out, payable, receivable, stock, sales],
        lines,
        documents: vec![
            document(paid_bill, "BILL-001", "paid"),
            document(sent_bill, "BILL-002", "sent"),
            document(invoice, "INV-001", "partially_paid"),
        ],
        paid_bill,
        sent_bill,
        invoice,
    }
}

fn january() -> DateRange {
    DateRange::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap()
}

#[test]
fn test_vat_input_register() {
    let f = fixture();
    let register = build_vat_register(
        VatDirection::Input,
        &f.accounts,
        &f.lines,
        &f.documents,
        january(),
        DocumentStatusFilter::All,
    );

    assert_eq!(register.document_count, 2);
    assert_eq!(register.rows[0].document_id, f.paid_bill);
    assert_eq!(register.rows[0].vat_amount, dec!(110));
    assert_eq!(register.rows[0].document_number.as_deref(), Some("BILL-001"));
    assert_eq!(register.rows[1].document_id, f.sent_bill);
    assert_eq!(register.rows[1].vat_amount, dec!(55));
    assert_eq!(register.total_vat, dec!(165));
}

#[test]
fn test_vat_output_register() {
    let f = fixture();
    let register = build_vat_register(
        VatDirection::Output,
        &f.accounts,
        &f.lines,
        &f.documents,
        january(),
        DocumentStatusFilter::All,
    );

    assert_eq!(register.document_count, 1);
    assert_eq!(register.rows[0].document_id, f.invoice);
    assert_eq!(register.rows[0].vat_amount, dec!(220));
    assert_eq!(register.rows[0].status.as_deref(), Some("partially_paid"));
    assert_eq!(register.total_vat, dec!(220));
}

#[rstest]
#[case(DocumentStatusFilter::Paid, 1, dec!(110))]
#[case(DocumentStatusFilter::Sent, 1, dec!(55))]
#[case(DocumentStatusFilter::PartiallyPaid, 0, dec!(0))]
#[case(DocumentStatusFilter::All, 2, dec!(165))]
fn test_status_filter_applies_to_document(
    #[case] filter: DocumentStatusFilter,
    #[case] rows: usize,
    #[case] total: rust_decimal::Decimal,
) {
    let f = fixture();
    let register = build_vat_register(
        VatDirection::Input,
        &f.accounts,
        &f.lines,
        &f.documents,
        january(),
        filter,
    );
    assert_eq!(register.rows.len(), rows);
    assert_eq!(register.total_vat, total);
}

#[test]
fn test_vat_amount_comes_from_lines_not_document() {
    let mut f = fixture();
    // Document claims a different subtotal; register VAT is unaffected.
    f.documents[0].subtotal = dec!(1);
    let register = build_vat_register(
        VatDirection::Input,
        &f.accounts,
        &f.lines,
        &f.documents,
        january(),
        DocumentStatusFilter::All,
    );
    assert_eq!(register.rows[0].vat_amount, dec!(110));
    assert_eq!(register.rows[0].subtotal, Some(dec!(1)));
}

#[test]
fn test_missing_document_only_passes_all() {
    let f = fixture();
    let register = build_vat_register(
        VatDirection::Input,
        &f.accounts,
        &f.lines,
        &[],
        january(),
        DocumentStatusFilter::All,
    );
    assert_eq!(register.rows.len(), 2);
    assert!(register.rows.iter().all(|r| r.document_number.is_none()));

    let filtered = build_vat_register(
        VatDirection::Input,
        &f.accounts,
        &f.lines,
        &[],
        january(),
        DocumentStatusFilter::Paid,
    );
    assert!(filtered.rows.is_empty());
}

#[test]
fn test_out_of_range_entries_are_skipped() {
    let f = fixture();
    let range = DateRange::new(date(2026, 1, 6), date(2026, 1, 31)).unwrap();
    let register = build_vat_register(
        VatDirection::Input,
        &f.accounts,
        &f.lines,
        &f.documents,
        range,
        DocumentStatusFilter::All,
    );
    assert_eq!(register.rows.len(), 1);
    assert_eq!(register.rows[0].document_id, f.sent_bill);
}

#[rstest]
#[case("all", Some(DocumentStatusFilter::All))]
#[case("", Some(DocumentStatusFilter::All))]
#[case("PAID", Some(DocumentStatusFilter::Paid))]
#[case("partially_paid", Some(DocumentStatusFilter::PartiallyPaid))]
#[case("sent", Some(DocumentStatusFilter::Sent))]
#[case("overdue", None)]
fn test_parse_status_filter(#[case] input: &str, #[case] expected: Option<DocumentStatusFilter>) {
    assert_eq!(DocumentStatusFilter::parse(input), expected);
}
