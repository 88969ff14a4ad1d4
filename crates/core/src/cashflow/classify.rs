//! Reference-type classification into cash flow categories.

use serde::{Deserialize, Serialize};

/// Cash flow statement section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowCategory {
    /// Day-to-day trading.
    Operating,
    /// Long-lived assets.
    Investing,
    /// Owners and lenders.
    Financing,
    /// Anything no rule matched.
    Other,
}

impl CashFlowCategory {
    /// All categories in statement order.
    pub const ALL: [Self; 4] = [Self::Operating, Self::Investing, Self::Financing, Self::Other];

    /// Returns the lowercase section name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Operating => "operating",
            Self::Investing => "investing",
            Self::Financing => "financing",
            Self::Other => "other",
        }
    }
}

/// Assigns `category` when any keyword occurs in the reference type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    /// Target category.
    pub category: CashFlowCategory,
    /// Lowercase keywords. A compound keyword such as `asset_purchase` matches
    /// anywhere; a single word must start one of the `_`-separated words of the
    /// reference type, so `vat` matches `vat_refund` but not `private_placement`.
    pub keywords: &'static [&'static str],
}

impl ClassificationRule {
    /// Returns true if `reference_type` (already normalized) carries a keyword.
    #[must_use]
    pub fn matches(&self, reference_type: &str) -> bool {
        self.keywords.iter().any(|keyword| {
            if keyword.contains('_') {
                reference_type.contains(keyword)
            } else {
                reference_type
                    .split('_')
                    .any(|word| word.starts_with(keyword))
            }
        })
    }
}

/// Rules in evaluation order. The first matching rule wins, so a reference
/// type hitting keywords of two categories resolves to the earlier one.
pub const CLASSIFICATION_RULES: [ClassificationRule; 3] = [
    ClassificationRule {
        category: CashFlowCategory::Operating,
        keywords: &[
            "invoice", "bill", "payroll", "salary", "wage", "receipt", "customer", "supplier",
            "vendor", "commission", "tax", "vat", "refund", "expense",
        ],
    },
    ClassificationRule {
        category: CashFlowCategory::Investing,
        keywords: &[
            "asset_purchase", "asset_sale", "asset_disposal", "fixed_asset", "depreciation",
            "investment", "equipment", "capex",
        ],
    },
    ClassificationRule {
        category: CashFlowCategory::Financing,
        keywords: &[
            "loan", "dividend", "owner_contribution", "owner_drawing", "capital", "equity",
            "share", "borrowing",
        ],
    },
];

/// Classifies a reference type, case-insensitively. Spaces and hyphens count
/// as word separators, like `_`.
///
/// Missing or unmatched reference types fall into `Other`.
#[must_use]
pub fn classify(reference_type: Option<&str>) -> CashFlowCategory {
    let Some(reference_type) = reference_type else {
        return CashFlowCategory::Other;
    };
    let normalized: String = reference_type
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect();

    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map_or(CashFlowCategory::Other, |rule| rule.category)
}
