//! VAT register types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reports::DateRange;

/// Which side of VAT a register covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatDirection {
    /// VAT paid on supplier bills, recoverable.
    Input,
    /// VAT charged on customer invoices, payable.
    Output,
}

impl VatDirection {
    /// Account sub-types that hold this side of VAT.
    #[must_use]
    pub const fn sub_types(&self) -> &'static [&'static str] {
        match self {
            Self::Input => &["vat_input", "vat_receivable"],
            Self::Output => &["vat_output", "vat_payable"],
        }
    }

    /// Entry reference type of the source documents.
    #[must_use]
    pub const fn reference_type(&self) -> &'static str {
        match self {
            Self::Input => "bill",
            Self::Output => "invoice",
        }
    }

    /// Returns the VAT amount carried by a line, or zero if the line is on
    /// the wrong side. Input VAT is a debit, output VAT a credit.
    #[must_use]
    pub fn line_amount(&self, debit: Decimal, credit: Decimal) -> Decimal {
        let amount = match self {
            Self::Input => debit,
            Self::Output => credit,
        };
        amount.max(Decimal::ZERO)
    }
}

/// A bill or invoice joined to the register for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDocument {
    /// Document ID, matched against the entry's `reference_id`.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Supplier or customer name.
    pub counterparty: Option<String>,
    /// Document date.
    pub document_date: NaiveDate,
    /// Amount before tax.
    pub subtotal: Decimal,
    /// Document status (e.g., `paid`, `sent`).
    pub status: String,
}

/// Optional filter on the joined document's status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Fully paid documents.
    Paid,
    /// Partially paid documents.
    PartiallyPaid,
    /// Issued but unpaid documents.
    Sent,
}

impl DocumentStatusFilter {
    /// Parses a query value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" | "" => Some(Self::All),
            "paid" => Some(Self::Paid),
            "partially_paid" => Some(Self::PartiallyPaid),
            "sent" => Some(Self::Sent),
            _ => None,
        }
    }

    /// Returns true if a row with this document passes the filter.
    ///
    /// Rows without a matching document only pass `All`.
    #[must_use]
    pub fn accepts(&self, document: Option<&TaxDocument>) -> bool {
        let wanted = match self {
            Self::All => return true,
            Self::Paid => "paid",
            Self::PartiallyPaid => "partially_paid",
            Self::Sent => "sent",
        };
        document.is_some_and(|d| d.status.eq_ignore_ascii_case(wanted))
    }
}

/// One document's VAT in the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatRegisterRow {
    /// Document ID, or the entry ID when the entry has no reference.
    pub document_id: Uuid,
    /// Document number.
    pub document_number: Option<String>,
    /// Document date.
    pub document_date: Option<NaiveDate>,
    /// Supplier or customer name.
    pub counterparty: Option<String>,
    /// Amount before tax.
    pub subtotal: Option<Decimal>,
    /// Document status.
    pub status: Option<String>,
    /// Posting date of the journal entry.
    pub entry_date: NaiveDate,
    /// Journal entry number.
    pub entry_number: String,
    /// VAT amount summed from journal lines.
    pub vat_amount: Decimal,
}

/// VAT input or output register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatRegister {
    /// Side of VAT.
    pub direction: VatDirection,
    /// Reporting range.
    pub period: DateRange,
    /// Applied document filter.
    pub status_filter: DocumentStatusFilter,
    /// Rows ordered by entry date then entry number.
    pub rows: Vec<VatRegisterRow>,
    /// Sum of row VAT amounts.
    pub total_vat: Decimal,
    /// Number of rows.
    pub document_count: usize,
}
