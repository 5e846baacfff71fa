use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::criteria::LenderRecord;
use super::domain::{AdverseCreditProfile, ClientId, OrganizationId};
use super::evaluation::{DecisionSummary, LenderDecision};

/// Client assessment as kept on the client record: the profile that was
/// assessed together with the lender results it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub client_id: ClientId,
    pub profile: AdverseCreditProfile,
    pub lender_results: Vec<LenderDecision>,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn summary(&self) -> DecisionSummary {
        DecisionSummary::from_decisions(&self.lender_results)
    }
}

/// Source of an organization's lender panel.
pub trait LenderPanelRepository: Send + Sync {
    fn lenders_for(&self, organization: &OrganizationId)
        -> Result<Vec<LenderRecord>, RepositoryError>;
}

/// Storage for assessments attached to client records.
pub trait AssessmentRepository: Send + Sync {
    fn save(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, client: &ClientId) -> Result<Option<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("panel is kept per organization; choose one of {}", .known.join(", "))]
    OrganizationRequired { known: Vec<String> },
}
