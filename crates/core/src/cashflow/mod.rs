//! Cash flow statement derivation.
//!
//! Restricts to cash and bank accounts, reduces each posted entry to a single
//! cash delta and buckets it by the entry's reference type.

pub mod classify;
pub mod statement;

#[cfg(test)]
mod tests;

pub use classify::{CLASSIFICATION_RULES, CashFlowCategory, ClassificationRule, classify};
pub use statement::{
    CASH_SUB_TYPES, CashFlowItem, CashFlowSection, CashFlowStatement, build_cash_flow,
};
