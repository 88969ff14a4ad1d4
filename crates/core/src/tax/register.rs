//! VAT register assembly.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use uuid::Uuid;
use kontor_shared::types::AccountId;

use super::types::{DocumentStatusFilter, TaxDocument, VatDirection, VatRegister, VatRegisterRow};
use crate::ledger::{Account, LedgerLine};
use crate::reports::DateRange;

/// Builds the VAT register for one direction.
///
/// Picks reportable in-range lines of entries whose reference type is the
/// direction's document type, posted to the direction's VAT accounts on the
/// direction's side. Lines are summed per document and joined to `documents`
/// by `reference_id`. The status filter applies to the joined document.
#[must_use]
pub fn build_vat_register(
    direction: VatDirection,
    accounts: &[Account],
    lines: &[LedgerLine],
    documents: &[TaxDocument],
    range: DateRange,
    status_filter: DocumentStatusFilter,
) -> VatRegister {
    let vat_accounts: HashSet<AccountId> = accounts
        .iter()
        .filter(|a| a.has_sub_type(direction.sub_types()))
        .map(|a| a.id)
        .collect();
    let documents_by_id: HashMap<Uuid, &TaxDocument> =
        documents.iter().map(|d| (d.id, d)).collect();

    let mut rows: HashMap<Uuid, VatRegisterRow> = HashMap::new();

    for line in lines.iter().filter(|l| {
        l.is_reportable()
            && range.contains(l.entry_date)
            && l.has_reference_type(direction.reference_type())
            && vat_accounts.contains(&l.account_id)
    }) {
        let amount = direction.line_amount(line.debit, line.credit);
        if amount.is_zero() {
            continue;
        }

        let document_id = line.reference_id.unwrap_or_else(|| line.entry_id.into_inner());
        let document = documents_by_id.get(&document_id).copied();
        if !status_filter.accepts(document) {
            continue;
        }

        rows.entry(document_id)
            .or_insert_with(|| VatRegisterRow {
                document_id,
                document_number: document.map(|d| d.number.clone()),
                document_date: document.map(|d| d.document_date),
                counterparty: document.and_then(|d| d.counterparty.clone()),
                subtotal: document.map(|d| d.subtotal),
                status: document.map(|d| d.status.clone()),
                entry_date: line.entry_date,
                entry_number: line.entry_number.clone(),
                vat_amount: Decimal::ZERO,
            })
            .vat_amount += amount;
    }

    let mut rows: Vec<VatRegisterRow> = rows.into_values().collect();
    rows.sort_by(|a, b| {
        (a.entry_date, &a.entry_number, a.document_id).cmp(&(b.entry_date, &b.entry_number, b.document_id))
    });

    VatRegister {
        direction,
        period: range,
        status_filter,
        total_vat: rows.iter().map(|r| r.vat_amount).sum(),
        document_count: rows.len(),
        rows,
    }
}
