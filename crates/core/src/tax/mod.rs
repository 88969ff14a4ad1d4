//! VAT input and output registers.
//!
//! VAT amounts always come from journal lines on VAT accounts. Source
//! documents only contribute display fields and the status filter.

pub mod register;
pub mod types;

#[cfg(test)]
mod tests;

pub use register::build_vat_register;
pub use types::{DocumentStatusFilter, TaxDocument, VatDirection, VatRegister, VatRegisterRow};
