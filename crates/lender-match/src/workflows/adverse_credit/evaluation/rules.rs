use chrono::{DateTime, Utc};

use super::super::criteria::{
    ArrearsCriteria, CriteriaThresholds, InsolvencyCriteria, LenderCriteria,
    SatisfactionRequirement,
};
use super::super::domain::AdverseCreditType;
use super::super::screening::{AdverseEvent, ArrearsHistory, InsolvencyRecord, JudgmentRecord};
use super::age::{age_months, exceeds_ceiling, format_pounds};
use super::policy::{CategoryVerdict, LenderStatus, RuleKind};

/// Evaluates one category's detail against a lender's policy for it.
pub(crate) trait CategoryRule {
    type Detail: ?Sized;
    type Criteria;

    fn evaluate(
        &self,
        detail: &Self::Detail,
        criteria: &Self::Criteria,
        reference: DateTime<Utc>,
    ) -> CategoryVerdict;
}

/// What happened when a category was put to a lender.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RuleOutcome {
    Evaluated(CategoryVerdict),
    /// The lender publishes no policy for this category.
    ConfigurationGap,
    /// Captured for the record but never judged.
    Inert,
}

pub(crate) fn evaluate_event(
    event: &AdverseEvent,
    criteria: &LenderCriteria,
    reference: DateTime<Utc>,
) -> RuleOutcome {
    match event {
        AdverseEvent::Ccjs(records) => {
            judge(&JudgmentRule::CCJS, records.as_slice(), criteria.ccjs.as_ref(), reference)
        }
        AdverseEvent::Defaults(records) => judge(
            &JudgmentRule::DEFAULTS,
            records.as_slice(),
            criteria.defaults.as_ref(),
            reference,
        ),
        AdverseEvent::Bankruptcy(record) => judge(
            &InsolvencyRule::BANKRUPTCY,
            record,
            criteria.bankruptcy.as_ref(),
            reference,
        ),
        AdverseEvent::Iva(record) => {
            judge(&InsolvencyRule::IVA, record, criteria.iva.as_ref(), reference)
        }
        AdverseEvent::MortgageArrears(history) => judge(
            &ArrearsRule::MORTGAGE,
            history,
            criteria.arrears.as_ref(),
            reference,
        ),
        AdverseEvent::UnsecuredArrears(history) => judge(
            &ArrearsRule::UNSECURED,
            history,
            criteria.arrears.as_ref(),
            reference,
        ),
        AdverseEvent::Repossessions(_) | AdverseEvent::DebtManagementPlan(_) => RuleOutcome::Inert,
    }
}

fn judge<R: CategoryRule>(
    rule: &R,
    detail: &R::Detail,
    criteria: Option<&R::Criteria>,
    reference: DateTime<Utc>,
) -> RuleOutcome {
    match criteria {
        Some(criteria) => RuleOutcome::Evaluated(rule.evaluate(detail, criteria, reference)),
        None => RuleOutcome::ConfigurationGap,
    }
}

/// Defaults and county court judgments.
pub(crate) struct JudgmentRule {
    category: AdverseCreditType,
    noun: &'static str,
    plural: &'static str,
}

impl JudgmentRule {
    pub(crate) const CCJS: JudgmentRule = JudgmentRule {
        category: AdverseCreditType::Ccjs,
        noun: "CCJ",
        plural: "CCJs",
    };

    pub(crate) const DEFAULTS: JudgmentRule = JudgmentRule {
        category: AdverseCreditType::Defaults,
        noun: "Default",
        plural: "defaults",
    };
}

impl CategoryRule for JudgmentRule {
    type Detail = [JudgmentRecord];
    type Criteria = CriteriaThresholds;

    fn evaluate(
        &self,
        records: &[JudgmentRecord],
        criteria: &CriteriaThresholds,
        reference: DateTime<Utc>,
    ) -> CategoryVerdict {
        let mut verdict = CategoryVerdict::accept(self.category);

        // max_by_key keeps the last of equally recent entries
        let Some(most_recent) = records.iter().max_by_key(|record| record.registered_at) else {
            return verdict;
        };

        let highest = records
            .iter()
            .map(|record| record.amount)
            .fold(0.0_f64, f64::max);
        let count = records.len();
        let age = age_months(most_recent.registered_at, reference);

        if let Some(max_amount) = criteria.max_amount {
            if exceeds_ceiling(highest, max_amount) {
                verdict.record(
                    RuleKind::AmountCeiling,
                    LenderStatus::Decline,
                    format!(
                        "{} amount ({}) exceeds maximum ({}).",
                        self.noun,
                        format_pounds(highest),
                        format_pounds(max_amount)
                    ),
                );
            }
        }

        if let Some(max_count) = criteria.max_count {
            if count > max_count as usize {
                verdict.record(
                    RuleKind::CountCeiling,
                    LenderStatus::Decline,
                    format!(
                        "{} count ({count}) exceeds maximum ({max_count}).",
                        self.noun
                    ),
                );
            }
        }

        if let Some(seasoning) = criteria.min_seasoning_months {
            if age < i64::from(seasoning) {
                verdict.record(
                    RuleKind::Seasoning,
                    LenderStatus::Consider,
                    format!(
                        "Most recent {} ({age} months) is newer than preferred ({seasoning} months).",
                        self.noun
                    ),
                );
            }
        }

        let has_unsatisfied = records.iter().any(|record| !record.satisfied);
        if has_unsatisfied && criteria.status == SatisfactionRequirement::Satisfied {
            verdict.record(
                RuleKind::SatisfactionRequired,
                LenderStatus::Decline,
                format!("Lender requires all {} to be satisfied.", self.plural),
            );
        }

        verdict
    }
}

/// Bankruptcy and IVA.
pub(crate) struct InsolvencyRule {
    category: AdverseCreditType,
    label: &'static str,
}

impl InsolvencyRule {
    pub(crate) const BANKRUPTCY: InsolvencyRule = InsolvencyRule {
        category: AdverseCreditType::Bankruptcy,
        label: "Bankruptcy",
    };

    pub(crate) const IVA: InsolvencyRule = InsolvencyRule {
        category: AdverseCreditType::Iva,
        label: "IVA",
    };
}

impl CategoryRule for InsolvencyRule {
    type Detail = InsolvencyRecord;
    type Criteria = InsolvencyCriteria;

    fn evaluate(
        &self,
        record: &InsolvencyRecord,
        criteria: &InsolvencyCriteria,
        reference: DateTime<Utc>,
    ) -> CategoryVerdict {
        let mut verdict = CategoryVerdict::accept(self.category);

        if let Some(required) = criteria.discharge_period_months {
            // not yet discharged gives a negative age, which always falls short
            let discharged = age_months(record.discharged_at, reference);
            if discharged < i64::from(required) {
                verdict.record(
                    RuleKind::DischargePeriod,
                    LenderStatus::Decline,
                    format!(
                        "{} discharge period ({discharged} months) is less than required ({required} months).",
                        self.label
                    ),
                );
            }
        }

        verdict
    }
}

/// Mortgage and unsecured arrears, judged against the lender's single arrears
/// policy. Only the 12-month window is compared with the tolerance.
pub(crate) struct ArrearsRule {
    category: AdverseCreditType,
    label: &'static str,
}

impl ArrearsRule {
    pub(crate) const MORTGAGE: ArrearsRule = ArrearsRule {
        category: AdverseCreditType::MortgageArrears,
        label: "Mortgage arrears",
    };

    pub(crate) const UNSECURED: ArrearsRule = ArrearsRule {
        category: AdverseCreditType::UnsecuredArrears,
        label: "Unsecured arrears",
    };
}

impl CategoryRule for ArrearsRule {
    type Detail = ArrearsHistory;
    type Criteria = ArrearsCriteria;

    fn evaluate(
        &self,
        history: &ArrearsHistory,
        criteria: &ArrearsCriteria,
        _reference: DateTime<Utc>,
    ) -> CategoryVerdict {
        let mut verdict = CategoryVerdict::accept(self.category);

        if let Some(tolerance) = criteria.arrears_tolerance {
            let missed = history.last_12_months;
            if missed > tolerance.count {
                verdict.record(
                    RuleKind::ArrearsTolerance,
                    LenderStatus::Consider,
                    format!(
                        "{} in last 12 months ({missed}) exceed tolerance ({}).",
                        self.label, tolerance.count
                    ),
                );
            }
        }

        verdict
    }
}
