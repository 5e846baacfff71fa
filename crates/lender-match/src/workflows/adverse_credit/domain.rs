use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for the client an assessment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// Identifier wrapper for the organization owning a lender panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub String);

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Adverse-credit categories an adviser can select for a client.
///
/// The declaration order is the order categories are evaluated in, so reasons
/// read the same regardless of the order an adviser ticked the boxes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AdverseCreditType {
    Defaults,
    #[serde(rename = "CCJs")]
    Ccjs,
    #[serde(alias = "Mortgage/Secured Loan Arrears")]
    MortgageArrears,
    #[serde(alias = "Unsecured Credit Arrears")]
    UnsecuredArrears,
    #[serde(rename = "IVA")]
    Iva,
    Bankruptcy,
    Repossessions,
    #[serde(alias = "Debt Management Plan")]
    DebtManagementPlan,
}

impl AdverseCreditType {
    pub const ALL: [AdverseCreditType; 8] = [
        AdverseCreditType::Defaults,
        AdverseCreditType::Ccjs,
        AdverseCreditType::MortgageArrears,
        AdverseCreditType::UnsecuredArrears,
        AdverseCreditType::Iva,
        AdverseCreditType::Bankruptcy,
        AdverseCreditType::Repossessions,
        AdverseCreditType::DebtManagementPlan,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            AdverseCreditType::Defaults => "Defaults",
            AdverseCreditType::Ccjs => "CCJs",
            AdverseCreditType::MortgageArrears => "Mortgage/Secured Loan Arrears",
            AdverseCreditType::UnsecuredArrears => "Unsecured Credit Arrears",
            AdverseCreditType::Iva => "IVA",
            AdverseCreditType::Bankruptcy => "Bankruptcy",
            AdverseCreditType::Repossessions => "Repossessions",
            AdverseCreditType::DebtManagementPlan => "Debt Management Plan",
        }
    }
}

impl fmt::Display for AdverseCreditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A client's adverse-credit history as captured by the adviser and stored on
/// the client record.
///
/// Dates are kept as the raw strings the adviser entered and counts as signed
/// integers; `ScreenedProfile` is the validated form the evaluator consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdverseCreditProfile {
    #[serde(default)]
    pub selected_types: Vec<AdverseCreditType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Vec<CreditEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ccjs: Option<Vec<CreditEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mortgage_arrears: Option<MissedPayments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsecured_arrears: Option<MissedPayments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iva: Option<InsolvencyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bankruptcy: Option<InsolvencyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmp: Option<DebtManagementPlanEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repossessions: Option<Vec<RepossessionEntry>>,
}

impl AdverseCreditProfile {
    pub fn is_selected(&self, category: AdverseCreditType) -> bool {
        self.selected_types.contains(&category)
    }
}

/// A registered default or county court judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditEntry {
    pub date_registered: String,
    pub amount: f64,
    #[serde(default)]
    pub satisfied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_satisfied: Option<String>,
}

/// Missed payments over the trailing windows shown on the adviser form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedPayments {
    #[serde(rename = "missedPayments6Months", default)]
    pub last_6_months: i64,
    #[serde(rename = "missedPayments12Months", default)]
    pub last_12_months: i64,
    #[serde(rename = "missedPayments24Months", default)]
    pub last_24_months: i64,
    #[serde(rename = "missedPayments36Months", default)]
    pub last_36_months: i64,
    #[serde(rename = "missedPayments48Months", default)]
    pub last_48_months: i64,
}

/// Bankruptcy or IVA details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsolvencyEntry {
    pub date_registered: String,
    #[serde(default)]
    pub total_debt: f64,
    pub date_discharged: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtManagementPlanEntry {
    pub start_date: String,
    #[serde(default)]
    pub months_paid: i64,
    #[serde(default)]
    pub monthly_payment: f64,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepossessionEntry {
    pub date_of_repossession: String,
    #[serde(default)]
    pub debt_cleared: bool,
    #[serde(default)]
    pub outstanding_amount: f64,
}
