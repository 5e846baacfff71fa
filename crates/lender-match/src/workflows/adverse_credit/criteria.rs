use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::AdverseCreditType;

/// Identifier wrapper for lenders on a panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LenderId(pub String);

impl fmt::Display for LenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lender on an organization's panel together with its written criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderRecord {
    pub id: LenderId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default)]
    pub criteria: LenderCriteria,
}

/// Categories a lender can publish criteria for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LenderCategory {
    #[serde(rename = "CCJs")]
    Ccjs,
    Defaults,
    Bankruptcy,
    Arrears,
    #[serde(rename = "IVA")]
    Iva,
    Repossessions,
}

impl LenderCategory {
    pub const ALL: [LenderCategory; 6] = [
        LenderCategory::Ccjs,
        LenderCategory::Defaults,
        LenderCategory::Bankruptcy,
        LenderCategory::Arrears,
        LenderCategory::Iva,
        LenderCategory::Repossessions,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LenderCategory::Ccjs => "CCJs",
            LenderCategory::Defaults => "Defaults",
            LenderCategory::Bankruptcy => "Bankruptcy",
            LenderCategory::Arrears => "Arrears",
            LenderCategory::Iva => "IVA",
            LenderCategory::Repossessions => "Repossessions",
        }
    }

    /// Lender category a profile category is judged against. Both arrears
    /// categories share the lender's single arrears policy; debt management
    /// plans have no lender-side category.
    pub const fn for_profile(category: AdverseCreditType) -> Option<Self> {
        match category {
            AdverseCreditType::Defaults => Some(LenderCategory::Defaults),
            AdverseCreditType::Ccjs => Some(LenderCategory::Ccjs),
            AdverseCreditType::MortgageArrears | AdverseCreditType::UnsecuredArrears => {
                Some(LenderCategory::Arrears)
            }
            AdverseCreditType::Iva => Some(LenderCategory::Iva),
            AdverseCreditType::Bankruptcy => Some(LenderCategory::Bankruptcy),
            AdverseCreditType::Repossessions => Some(LenderCategory::Repossessions),
            AdverseCreditType::DebtManagementPlan => None,
        }
    }
}

impl fmt::Display for LenderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category acceptance policy. An absent category means the lender has not
/// published a policy for it, which is never treated as a decline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LenderCriteria {
    #[serde(rename = "CCJs", default, skip_serializing_if = "Option::is_none")]
    pub ccjs: Option<CriteriaThresholds>,
    #[serde(rename = "Defaults", default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<CriteriaThresholds>,
    #[serde(rename = "Bankruptcy", default, skip_serializing_if = "Option::is_none")]
    pub bankruptcy: Option<InsolvencyCriteria>,
    #[serde(rename = "Arrears", default, skip_serializing_if = "Option::is_none")]
    pub arrears: Option<ArrearsCriteria>,
    #[serde(rename = "IVA", default, skip_serializing_if = "Option::is_none")]
    pub iva: Option<InsolvencyCriteria>,
    #[serde(rename = "Repossessions", default, skip_serializing_if = "Option::is_none")]
    pub repossessions: Option<CriteriaThresholds>,
}

impl LenderCriteria {
    /// Common thresholds published for a category, if any.
    pub fn thresholds(&self, category: LenderCategory) -> Option<&CriteriaThresholds> {
        match category {
            LenderCategory::Ccjs => self.ccjs.as_ref(),
            LenderCategory::Defaults => self.defaults.as_ref(),
            LenderCategory::Bankruptcy => self.bankruptcy.as_ref().map(|c| &c.thresholds),
            LenderCategory::Arrears => self.arrears.as_ref().map(|c| &c.thresholds),
            LenderCategory::Iva => self.iva.as_ref().map(|c| &c.thresholds),
            LenderCategory::Repossessions => self.repossessions.as_ref(),
        }
    }
}

/// Whether a lender insists every event of a category has been satisfied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SatisfactionRequirement {
    Satisfied,
    #[default]
    Unsatisfied,
}

impl SatisfactionRequirement {
    pub const fn label(self) -> &'static str {
        match self {
            SatisfactionRequirement::Satisfied => "satisfied",
            SatisfactionRequirement::Unsatisfied => "unsatisfied",
        }
    }
}

/// Thresholds shared by every category. Unset ceilings are not checked.
///
/// `min_seasoning_months` is stored under the lender form's `max_age_months`
/// key: events younger than it are referred rather than accepted outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,
    #[serde(
        rename = "max_age_months",
        alias = "min_seasoning_months",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_seasoning_months: Option<u32>,
    #[serde(default)]
    pub status: SatisfactionRequirement,
}

/// Bankruptcy and IVA policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsolvencyCriteria {
    #[serde(flatten)]
    pub thresholds: CriteriaThresholds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_period_months: Option<u32>,
}

/// Arrears policy shared by mortgage and unsecured arrears.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrearsCriteria {
    #[serde(flatten)]
    pub thresholds: CriteriaThresholds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrears_tolerance: Option<ArrearsTolerance>,
}

/// Missed-payment allowance within a trailing window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearsTolerance {
    #[serde(default)]
    pub months: u32,
    pub count: u32,
}
