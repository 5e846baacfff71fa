use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::ClientId;
use super::evaluation::{DecisionSummary, LenderDecision};
use super::repository::{AssessmentRepository, LenderPanelRepository, RepositoryError};
use super::service::{LenderSearchError, LenderSearchRequest, LenderSearchService};

/// Search payload; `reference_time` defaults to the time the request arrives.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LenderSearchPayload {
    #[serde(flatten)]
    pub request: LenderSearchRequest,
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LenderSearchResponse {
    pub reference_time: DateTime<Utc>,
    pub summary: DecisionSummary,
    pub lender_results: Vec<LenderDecision>,
}

/// Router builder exposing lender search and stored assessments.
pub fn lender_search_router<P, S>(service: Arc<LenderSearchService<P, S>>) -> Router
where
    P: LenderPanelRepository + 'static,
    S: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/lender-search", post(search_handler::<P, S>))
        .route(
            "/api/v1/clients/:client_id/assessment",
            get(assessment_handler::<P, S>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<P, S>(
    State(service): State<Arc<LenderSearchService<P, S>>>,
    axum::Json(payload): axum::Json<LenderSearchPayload>,
) -> Response
where
    P: LenderPanelRepository + 'static,
    S: AssessmentRepository + 'static,
{
    let reference_time = payload.reference_time.unwrap_or_else(Utc::now);

    match service.search(payload.request, reference_time) {
        Ok(lender_results) => {
            let response = LenderSearchResponse {
                reference_time,
                summary: DecisionSummary::from_decisions(&lender_results),
                lender_results,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(LenderSearchError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn assessment_handler<P, S>(
    State(service): State<Arc<LenderSearchService<P, S>>>,
    Path(client_id): Path<String>,
) -> Response
where
    P: LenderPanelRepository + 'static,
    S: AssessmentRepository + 'static,
{
    let id = ClientId(client_id);
    match service.assessment(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(LenderSearchError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "client_id": id.0,
                "error": "no assessment stored for client",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
