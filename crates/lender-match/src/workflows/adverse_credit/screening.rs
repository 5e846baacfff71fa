use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::domain::{
    AdverseCreditProfile, AdverseCreditType, CreditEntry, DebtManagementPlanEntry,
    InsolvencyEntry, MissedPayments, RepossessionEntry,
};

/// Validation errors raised while screening a stored profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{category}: {field} '{value}' is not a valid date")]
    InvalidDate {
        category: AdverseCreditType,
        field: String,
        value: String,
    },
    #[error("{category}: {field} must be a non-negative amount (found {value})")]
    InvalidAmount {
        category: AdverseCreditType,
        field: String,
        value: f64,
    },
    #[error("{category}: {field} must be a non-negative count (found {value})")]
    InvalidCount {
        category: AdverseCreditType,
        field: String,
        value: i64,
    },
}

/// A validated default or judgment.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgmentRecord {
    pub registered_at: DateTime<Utc>,
    pub amount: f64,
    pub satisfied: bool,
    pub satisfied_at: Option<DateTime<Utc>>,
}

/// Missed-payment counts per trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrearsHistory {
    pub last_6_months: u32,
    pub last_12_months: u32,
    pub last_24_months: u32,
    pub last_36_months: u32,
    pub last_48_months: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsolvencyRecord {
    pub registered_at: DateTime<Utc>,
    pub total_debt: f64,
    pub discharged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebtManagementPlan {
    pub started_at: DateTime<Utc>,
    pub months_paid: u32,
    pub monthly_payment: f64,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepossessionRecord {
    pub repossessed_at: DateTime<Utc>,
    pub debt_cleared: bool,
    pub outstanding_amount: f64,
}

/// One selected category together with its validated detail.
#[derive(Debug, Clone, PartialEq)]
pub enum AdverseEvent {
    Defaults(Vec<JudgmentRecord>),
    Ccjs(Vec<JudgmentRecord>),
    MortgageArrears(ArrearsHistory),
    UnsecuredArrears(ArrearsHistory),
    Iva(InsolvencyRecord),
    Bankruptcy(InsolvencyRecord),
    Repossessions(Vec<RepossessionRecord>),
    DebtManagementPlan(DebtManagementPlan),
}

impl AdverseEvent {
    pub fn category(&self) -> AdverseCreditType {
        match self {
            AdverseEvent::Defaults(_) => AdverseCreditType::Defaults,
            AdverseEvent::Ccjs(_) => AdverseCreditType::Ccjs,
            AdverseEvent::MortgageArrears(_) => AdverseCreditType::MortgageArrears,
            AdverseEvent::UnsecuredArrears(_) => AdverseCreditType::UnsecuredArrears,
            AdverseEvent::Iva(_) => AdverseCreditType::Iva,
            AdverseEvent::Bankruptcy(_) => AdverseCreditType::Bankruptcy,
            AdverseEvent::Repossessions(_) => AdverseCreditType::Repossessions,
            AdverseEvent::DebtManagementPlan(_) => AdverseCreditType::DebtManagementPlan,
        }
    }
}

/// The validated profile consumed by the evaluator.
///
/// Holds one event per selected category that carries detail, in category
/// order. Selected categories without detail are dropped here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenedProfile {
    events: Vec<AdverseEvent>,
}

impl ScreenedProfile {
    /// Validate the selected categories of a stored profile.
    ///
    /// Detail recorded for categories that are not selected is ignored, even
    /// when it would not validate.
    pub fn from_profile(profile: &AdverseCreditProfile) -> Result<Self, ValidationError> {
        let selected: BTreeSet<AdverseCreditType> =
            profile.selected_types.iter().copied().collect();

        let mut events = Vec::with_capacity(selected.len());
        for category in selected {
            if let Some(event) = screen_category(profile, category)? {
                events.push(event);
            }
        }

        Ok(Self { events })
    }

    pub fn events(&self) -> &[AdverseEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn screen_category(
    profile: &AdverseCreditProfile,
    category: AdverseCreditType,
) -> Result<Option<AdverseEvent>, ValidationError> {
    let event = match category {
        AdverseCreditType::Defaults => profile
            .defaults
            .as_deref()
            .map(|entries| screen_judgments(category, "defaults", entries))
            .transpose()?
            .map(AdverseEvent::Defaults),
        AdverseCreditType::Ccjs => profile
            .ccjs
            .as_deref()
            .map(|entries| screen_judgments(category, "ccjs", entries))
            .transpose()?
            .map(AdverseEvent::Ccjs),
        AdverseCreditType::MortgageArrears => profile
            .mortgage_arrears
            .as_ref()
            .map(|arrears| screen_arrears(category, "mortgageArrears", arrears))
            .transpose()?
            .map(AdverseEvent::MortgageArrears),
        AdverseCreditType::UnsecuredArrears => profile
            .unsecured_arrears
            .as_ref()
            .map(|arrears| screen_arrears(category, "unsecuredArrears", arrears))
            .transpose()?
            .map(AdverseEvent::UnsecuredArrears),
        AdverseCreditType::Iva => profile
            .iva
            .as_ref()
            .map(|entry| screen_insolvency(category, "iva", entry))
            .transpose()?
            .map(AdverseEvent::Iva),
        AdverseCreditType::Bankruptcy => profile
            .bankruptcy
            .as_ref()
            .map(|entry| screen_insolvency(category, "bankruptcy", entry))
            .transpose()?
            .map(AdverseEvent::Bankruptcy),
        AdverseCreditType::Repossessions => profile
            .repossessions
            .as_deref()
            .map(|entries| screen_repossessions(category, entries))
            .transpose()?
            .map(AdverseEvent::Repossessions),
        AdverseCreditType::DebtManagementPlan => profile
            .dmp
            .as_ref()
            .map(|plan| screen_plan(category, plan))
            .transpose()?
            .map(AdverseEvent::DebtManagementPlan),
    };

    Ok(event)
}

fn screen_judgments(
    category: AdverseCreditType,
    prefix: &str,
    entries: &[CreditEntry],
) -> Result<Vec<JudgmentRecord>, ValidationError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let field = |name: &str| format!("{prefix}[{index}].{name}");
            let satisfied_at = entry
                .date_satisfied
                .as_deref()
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| parse_profile_date(category, field("dateSatisfied"), raw))
                .transpose()?;

            Ok(JudgmentRecord {
                registered_at: parse_profile_date(
                    category,
                    field("dateRegistered"),
                    &entry.date_registered,
                )?,
                amount: non_negative_amount(category, field("amount"), entry.amount)?,
                satisfied: entry.satisfied,
                satisfied_at,
            })
        })
        .collect()
}

fn screen_arrears(
    category: AdverseCreditType,
    prefix: &str,
    arrears: &MissedPayments,
) -> Result<ArrearsHistory, ValidationError> {
    let count = |name: &str, value: i64| {
        non_negative_count(category, format!("{prefix}.{name}"), value)
    };

    Ok(ArrearsHistory {
        last_6_months: count("missedPayments6Months", arrears.last_6_months)?,
        last_12_months: count("missedPayments12Months", arrears.last_12_months)?,
        last_24_months: count("missedPayments24Months", arrears.last_24_months)?,
        last_36_months: count("missedPayments36Months", arrears.last_36_months)?,
        last_48_months: count("missedPayments48Months", arrears.last_48_months)?,
    })
}

fn screen_insolvency(
    category: AdverseCreditType,
    prefix: &str,
    entry: &InsolvencyEntry,
) -> Result<InsolvencyRecord, ValidationError> {
    Ok(InsolvencyRecord {
        registered_at: parse_profile_date(
            category,
            format!("{prefix}.dateRegistered"),
            &entry.date_registered,
        )?,
        total_debt: non_negative_amount(category, format!("{prefix}.totalDebt"), entry.total_debt)?,
        discharged_at: parse_profile_date(
            category,
            format!("{prefix}.dateDischarged"),
            &entry.date_discharged,
        )?,
    })
}

fn screen_repossessions(
    category: AdverseCreditType,
    entries: &[RepossessionEntry],
) -> Result<Vec<RepossessionRecord>, ValidationError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let field = |name: &str| format!("repossessions[{index}].{name}");
            Ok(RepossessionRecord {
                repossessed_at: parse_profile_date(
                    category,
                    field("dateOfRepossession"),
                    &entry.date_of_repossession,
                )?,
                debt_cleared: entry.debt_cleared,
                outstanding_amount: non_negative_amount(
                    category,
                    field("outstandingAmount"),
                    entry.outstanding_amount,
                )?,
            })
        })
        .collect()
}

fn screen_plan(
    category: AdverseCreditType,
    plan: &DebtManagementPlanEntry,
) -> Result<DebtManagementPlan, ValidationError> {
    Ok(DebtManagementPlan {
        started_at: parse_profile_date(category, "dmp.startDate".to_string(), &plan.start_date)?,
        months_paid: non_negative_count(category, "dmp.monthsPaid".to_string(), plan.months_paid)?,
        monthly_payment: non_negative_amount(
            category,
            "dmp.monthlyPayment".to_string(),
            plan.monthly_payment,
        )?,
        ends_at: parse_profile_date(category, "dmp.endDate".to_string(), &plan.end_date)?,
    })
}

/// Accepts `YYYY-MM-DD` as entered on the adviser form, read as midnight UTC,
/// or a full RFC 3339 timestamp as some stored profiles carry, kept as the
/// exact instant it names.
pub fn parse_profile_date(
    category: AdverseCreditType,
    field: String,
    raw: &str,
) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .or_else(|_| {
            DateTime::parse_from_rfc3339(trimmed).map(|value| value.with_timezone(&Utc))
        })
        .map_err(|_| ValidationError::InvalidDate {
            category,
            field,
            value: raw.to_string(),
        })
}

fn non_negative_amount(
    category: AdverseCreditType,
    field: String,
    value: f64,
) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidAmount {
            category,
            field,
            value,
        })
    }
}

fn non_negative_count(
    category: AdverseCreditType,
    field: String,
    value: i64,
) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::InvalidCount {
        category,
        field,
        value,
    })
}
