//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{MATERIALITY_THRESHOLD, approx_eq, is_material, round_amount, round_percent};
pub use pagination::{PageMeta, PageRequest, PageResponse};
