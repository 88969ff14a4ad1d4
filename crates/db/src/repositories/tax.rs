//! Source documents for the VAT registers.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{bills, invoices};
use kontor_core::tax::{TaxDocument, VatDirection};
use kontor_shared::types::CompanyId;

/// Tax document repository.
#[derive(Debug, Clone)]
pub struct TaxRepository {
    db: DatabaseConnection,
}

impl TaxRepository {
    /// Creates a new tax repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the bills (input) or invoices (output) with the given IDs.
    pub async fn documents(
        &self,
        company_id: CompanyId,
        direction: VatDirection,
        ids: &[Uuid],
    ) -> Result<Vec<TaxDocument>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let documents = match direction {
            VatDirection::Input => bills::Entity::find()
                .filter(bills::Column::CompanyId.eq(company_id.into_inner()))
                .filter(bills::Column::Id.is_in(ids.to_vec()))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|b| TaxDocument {
                    id: b.id,
                    number: b.bill_number,
                    counterparty: b.supplier_name,
                    document_date: b.bill_date,
                    subtotal: b.subtotal,
                    status: b.status,
                })
                .collect(),
            VatDirection::Output => invoices::Entity::find()
                .filter(invoices::Column::CompanyId.eq(company_id.into_inner()))
                .filter(invoices::Column::Id.is_in(ids.to_vec()))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|i| TaxDocument {
                    id: i.id,
                    number: i.invoice_number,
                    counterparty: i.customer_name,
                    document_date: i.invoice_date,
                    subtotal: i.subtotal,
                    status: i.status,
                })
                .collect(),
        };

        Ok(documents)
    }
}
