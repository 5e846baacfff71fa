use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{AdverseCreditProfile, ClientId, OrganizationId};
use super::evaluation::{LenderDecision, MatchingConfig, ProfileEvaluator};
use super::repository::{
    AssessmentRecord, AssessmentRepository, LenderPanelRepository, RepositoryError,
};
use super::screening::{ScreenedProfile, ValidationError};

/// A lender search for one client of an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderSearchRequest {
    pub organization_id: OrganizationId,
    /// When present the results are stored on this client's record.
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub profile: AdverseCreditProfile,
}

/// Service composing the lender panel, the evaluator, and assessment storage.
pub struct LenderSearchService<P, S> {
    panels: Arc<P>,
    assessments: Arc<S>,
    evaluator: Arc<ProfileEvaluator>,
}

impl<P, S> LenderSearchService<P, S>
where
    P: LenderPanelRepository + 'static,
    S: AssessmentRepository + 'static,
{
    pub fn new(panels: Arc<P>, assessments: Arc<S>, config: MatchingConfig) -> Self {
        Self {
            panels,
            assessments,
            evaluator: Arc::new(ProfileEvaluator::new(config)),
        }
    }

    /// Match the profile against the organization's panel.
    ///
    /// The profile is validated before the panel is fetched. An organization
    /// without lenders yields an empty result rather than an error.
    pub fn search(
        &self,
        request: LenderSearchRequest,
        reference_time: DateTime<Utc>,
    ) -> Result<Vec<LenderDecision>, LenderSearchError> {
        let LenderSearchRequest {
            organization_id,
            client_id,
            profile,
        } = request;

        let screened = ScreenedProfile::from_profile(&profile)?;
        let lenders = self.panels.lenders_for(&organization_id)?;
        if lenders.is_empty() {
            warn!(organization = %organization_id, "no lenders found for organization");
        }

        let decisions = self
            .evaluator
            .evaluate_screened(&screened, &lenders, reference_time);

        if let Some(client_id) = client_id {
            self.assessments.save(AssessmentRecord {
                client_id: client_id.clone(),
                profile,
                lender_results: decisions.clone(),
                assessed_at: reference_time,
            })?;
            info!(client = %client_id.0, lenders = decisions.len(), "stored lender results");
        }

        Ok(decisions)
    }

    /// Fetch the last stored assessment for a client.
    pub fn assessment(&self, client_id: &ClientId) -> Result<AssessmentRecord, LenderSearchError> {
        let record = self
            .assessments
            .fetch(client_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the lender search service.
#[derive(Debug, thiserror::Error)]
pub enum LenderSearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
