pub mod age;
mod config;
mod policy;
mod rules;

pub use config::{MatchingConfig, DEFAULT_PRODUCT_LABEL};
pub use policy::{
    render_reason, CategoryVerdict, DecisionSummary, Finding, LenderDecision, LenderStatus,
    RuleKind, MEETS_ALL_CRITERIA,
};

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace};

use super::criteria::{LenderCategory, LenderRecord};
use super::domain::AdverseCreditProfile;
use super::screening::{ScreenedProfile, ValidationError};
use policy::decide_lender;
use rules::{evaluate_event, RuleOutcome};

/// Stateless evaluator matching an adverse-credit profile against a panel.
///
/// The reference time is always supplied by the caller, so the same arguments
/// give the same decisions.
#[derive(Debug, Clone, Default)]
pub struct ProfileEvaluator {
    config: MatchingConfig,
}

impl ProfileEvaluator {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Validate `profile` and decide every lender, in panel order.
    ///
    /// A malformed profile fails the whole call; no partial results are
    /// returned.
    pub fn evaluate(
        &self,
        profile: &AdverseCreditProfile,
        lenders: &[LenderRecord],
        reference_time: DateTime<Utc>,
    ) -> Result<Vec<LenderDecision>, ValidationError> {
        let screened = ScreenedProfile::from_profile(profile)?;
        Ok(self.evaluate_screened(&screened, lenders, reference_time))
    }

    pub fn evaluate_screened(
        &self,
        profile: &ScreenedProfile,
        lenders: &[LenderRecord],
        reference_time: DateTime<Utc>,
    ) -> Vec<LenderDecision> {
        let decisions: Vec<LenderDecision> = lenders
            .iter()
            .map(|lender| self.decide(profile, lender, reference_time))
            .collect();

        let summary = DecisionSummary::from_decisions(&decisions);
        info!(
            lenders = decisions.len(),
            categories = profile.events().len(),
            accept = summary.accept,
            consider = summary.consider,
            decline = summary.decline,
            "evaluated adverse credit profile against lender panel"
        );

        decisions
    }

    fn decide(
        &self,
        profile: &ScreenedProfile,
        lender: &LenderRecord,
        reference_time: DateTime<Utc>,
    ) -> LenderDecision {
        let mut verdicts = Vec::with_capacity(profile.events().len());

        for event in profile.events() {
            let category = event.category();
            match evaluate_event(event, &lender.criteria, reference_time) {
                RuleOutcome::Evaluated(verdict) => verdicts.push(verdict),
                RuleOutcome::ConfigurationGap => debug!(
                    lender = %lender.id,
                    %category,
                    lender_category = ?LenderCategory::for_profile(category),
                    "lender has no criteria for selected category; skipping"
                ),
                RuleOutcome::Inert => trace!(
                    lender = %lender.id,
                    %category,
                    "category is recorded but not judged"
                ),
            }
        }

        decide_lender(lender, &self.config.default_product, verdicts)
    }
}

/// Evaluate with the default configuration.
pub fn evaluate(
    profile: &AdverseCreditProfile,
    lenders: &[LenderRecord],
    reference_time: DateTime<Utc>,
) -> Result<Vec<LenderDecision>, ValidationError> {
    ProfileEvaluator::default().evaluate(profile, lenders, reference_time)
}
