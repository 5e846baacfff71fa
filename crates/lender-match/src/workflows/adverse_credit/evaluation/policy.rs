use serde::{Deserialize, Serialize};

use super::super::criteria::{LenderId, LenderRecord};
use super::super::domain::AdverseCreditType;

/// Reason reported when no rule fired for a lender.
pub const MEETS_ALL_CRITERIA: &str = "Meets all criteria";

/// Outcome for a lender, ordered from most to least favourable so the worst
/// outcome across categories is simply the maximum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LenderStatus {
    #[default]
    Accept,
    Consider,
    Decline,
}

impl LenderStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LenderStatus::Accept => "Accept",
            LenderStatus::Consider => "Consider",
            LenderStatus::Decline => "Decline",
        }
    }

    /// Combine with another verdict. A status only ever worsens.
    pub fn escalate(self, other: LenderStatus) -> LenderStatus {
        self.max(other)
    }
}

/// Rule that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    AmountCeiling,
    CountCeiling,
    Seasoning,
    SatisfactionRequired,
    DischargePeriod,
    ArrearsTolerance,
}

/// A single triggered rule, kept structured until it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub category: AdverseCreditType,
    pub rule: RuleKind,
    pub verdict: LenderStatus,
    pub detail: String,
}

/// Verdict for one category of one lender.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryVerdict {
    pub category: AdverseCreditType,
    pub status: LenderStatus,
    pub findings: Vec<Finding>,
}

impl CategoryVerdict {
    pub(crate) fn accept(category: AdverseCreditType) -> Self {
        Self {
            category,
            status: LenderStatus::Accept,
            findings: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, rule: RuleKind, verdict: LenderStatus, detail: String) {
        self.status = self.status.escalate(verdict);
        self.findings.push(Finding {
            category: self.category,
            rule,
            verdict,
            detail,
        });
    }

    /// Rendered reason fragment, empty when nothing fired.
    pub fn message(&self) -> String {
        render_fragments(&self.findings)
    }
}

/// Decision for a single lender on the panel.
///
/// Serializes as the `{id, name, status, product, reason}` record stored
/// alongside client profiles. Findings stay in memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderDecision {
    #[serde(rename = "id")]
    pub lender_id: LenderId,
    #[serde(rename = "name")]
    pub lender_name: String,
    pub status: LenderStatus,
    pub product: String,
    pub reason: String,
    #[serde(skip)]
    pub findings: Vec<Finding>,
}

impl LenderDecision {
    pub fn meets_all_criteria(&self) -> bool {
        self.reason == MEETS_ALL_CRITERIA
    }

    pub fn findings_for(&self, category: AdverseCreditType) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |finding| finding.category == category)
    }
}

pub(crate) fn decide_lender(
    lender: &LenderRecord,
    default_product: &str,
    verdicts: Vec<CategoryVerdict>,
) -> LenderDecision {
    let mut status = LenderStatus::Accept;
    let mut findings = Vec::new();

    for verdict in verdicts {
        status = status.escalate(verdict.status);
        findings.extend(verdict.findings);
    }

    LenderDecision {
        lender_id: lender.id.clone(),
        lender_name: lender.name.clone(),
        status,
        product: lender
            .product
            .clone()
            .unwrap_or_else(|| default_product.to_string()),
        reason: render_reason(&findings),
        findings,
    }
}

/// Render findings into the adviser-facing reason text.
pub fn render_reason(findings: &[Finding]) -> String {
    if findings.is_empty() {
        MEETS_ALL_CRITERIA.to_string()
    } else {
        render_fragments(findings)
    }
}

fn render_fragments(findings: &[Finding]) -> String {
    findings.iter().fold(String::new(), |mut reason, finding| {
        reason.push_str(&finding.detail);
        reason.push(' ');
        reason
    })
}

/// Tally of decisions by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub accept: usize,
    pub consider: usize,
    pub decline: usize,
}

impl DecisionSummary {
    pub fn from_decisions(decisions: &[LenderDecision]) -> Self {
        decisions
            .iter()
            .fold(Self::default(), |mut summary, decision| {
                match decision.status {
                    LenderStatus::Accept => summary.accept += 1,
                    LenderStatus::Consider => summary.consider += 1,
                    LenderStatus::Decline => summary.decline += 1,
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(rule: RuleKind, verdict: LenderStatus, detail: &str) -> Finding {
        Finding {
            category: AdverseCreditType::Ccjs,
            rule,
            verdict,
            detail: detail.to_string(),
        }
    }

    #[test]
    fn status_orders_decline_above_consider_above_accept() {
        assert!(LenderStatus::Decline > LenderStatus::Consider);
        assert!(LenderStatus::Consider > LenderStatus::Accept);
        assert_eq!(
            LenderStatus::Decline.escalate(LenderStatus::Consider),
            LenderStatus::Decline
        );
        assert_eq!(
            LenderStatus::Accept.escalate(LenderStatus::Consider),
            LenderStatus::Consider
        );
    }

    #[test]
    fn empty_findings_render_meets_all_criteria() {
        assert_eq!(render_reason(&[]), MEETS_ALL_CRITERIA);
    }

    #[test]
    fn fragments_keep_order_and_trailing_space() {
        let findings = vec![
            finding(RuleKind::AmountCeiling, LenderStatus::Decline, "First."),
            finding(RuleKind::Seasoning, LenderStatus::Consider, "Second."),
        ];
        assert_eq!(render_reason(&findings), "First. Second. ");
    }

    #[test]
    fn category_verdict_never_relaxes() {
        let mut verdict = CategoryVerdict::accept(AdverseCreditType::Ccjs);
        verdict.record(RuleKind::AmountCeiling, LenderStatus::Decline, "a".into());
        verdict.record(RuleKind::Seasoning, LenderStatus::Consider, "b".into());
        assert_eq!(verdict.status, LenderStatus::Decline);
        assert_eq!(verdict.message(), "a b ");
    }
}
