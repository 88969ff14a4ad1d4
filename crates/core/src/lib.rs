//! Core business logic for Kontor.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every function takes the rows it needs as arguments and returns a value, so
//! report derivation can run in parallel and is tested without a store.
//!
//! # Modules
//!
//! - `period` - Period lock evaluation and lock/unlock transitions
//! - `audit` - Audit event construction and verb normalization
//! - `ledger` - Accounts, journal lines and integrity checks
//! - `reports` - General ledger and trial balance
//! - `cashflow` - Cash flow classification and statement
//! - `tax` - VAT input/output registers
//! - `dashboard` - Dashboard summary figures

pub mod audit;
pub mod auth;
pub mod cashflow;
pub mod dashboard;
pub mod ledger;
pub mod period;
pub mod reports;
pub mod tax;

#[cfg(test)]
mod testing;
