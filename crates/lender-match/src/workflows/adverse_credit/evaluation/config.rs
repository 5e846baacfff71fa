use serde::{Deserialize, Serialize};

/// Product label reported for lenders that do not publish their own.
pub const DEFAULT_PRODUCT_LABEL: &str = "Residential/BTL";

/// Presentation settings for the evaluator. Thresholds live on the lender
/// records themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub default_product: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_product: DEFAULT_PRODUCT_LABEL.to_string(),
        }
    }
}
