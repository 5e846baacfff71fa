//! Adverse-credit profiling and lender panel matching.
//!
//! A profile captured by an adviser is screened into typed events, each event
//! is judged against every lender's published criteria, and the worst outcome
//! per lender becomes its Accept/Consider/Decline decision.

pub mod criteria;
pub mod domain;
pub mod evaluation;
pub mod export;
pub mod repository;
pub mod router;
pub mod screening;
pub mod service;

#[cfg(test)]
mod tests;

pub use criteria::{
    ArrearsCriteria, ArrearsTolerance, CriteriaThresholds, InsolvencyCriteria, LenderCategory,
    LenderCriteria, LenderId, LenderRecord, SatisfactionRequirement,
};
pub use domain::{
    AdverseCreditProfile, AdverseCreditType, ClientId, CreditEntry, DebtManagementPlanEntry,
    InsolvencyEntry, MissedPayments, OrganizationId, RepossessionEntry,
};
pub use evaluation::{
    evaluate, DecisionSummary, Finding, LenderDecision, LenderStatus, MatchingConfig,
    ProfileEvaluator, RuleKind, DEFAULT_PRODUCT_LABEL, MEETS_ALL_CRITERIA,
};
pub use export::{write_decisions_csv, write_panel_csv, ExportError};
pub use repository::{
    AssessmentRecord, AssessmentRepository, LenderPanelRepository, RepositoryError,
};
pub use router::{lender_search_router, LenderSearchPayload, LenderSearchResponse};
pub use screening::{AdverseEvent, ScreenedProfile, ValidationError};
pub use service::{LenderSearchError, LenderSearchRequest, LenderSearchService};
