use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use lender_match::workflows::adverse_credit::{
    lender_search_router, AssessmentRepository, LenderPanelRepository, LenderSearchService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_lender_search_routes<P, S>(
    service: Arc<LenderSearchService<P, S>>,
) -> axum::Router
where
    P: LenderPanelRepository + 'static,
    S: AssessmentRepository + 'static,
{
    lender_search_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Acquire);
    if ready {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "loading lender panel" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{demo_panel, InMemoryAssessmentStore, InMemoryLenderPanel};
    use axum::body::Body;
    use axum::http::Request;
    use lender_match::workflows::adverse_credit::MatchingConfig;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        }
    }

    fn app(state: AppState) -> axum::Router {
        let service = Arc::new(LenderSearchService::new(
            Arc::new(InMemoryLenderPanel::shared(demo_panel())),
            Arc::new(InMemoryAssessmentStore::default()),
            MatchingConfig::default(),
        ));
        with_lender_search_routes(service).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(app_state(true))
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("route");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let state = app_state(false);
        let response = app(state.clone())
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = app(state)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn lender_search_is_served_alongside_health_checks() {
        let body = json!({
            "organization_id": "org-demo",
            "reference_time": "2025-03-01T00:00:00Z",
            "profile": { "selectedTypes": [] }
        });
        let response = app(app_state(true))
            .oneshot(
                Request::post("/api/v1/lender-search")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("route");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["summary"]["accept"], demo_panel().len());
        assert_eq!(payload["lender_results"][2]["product"], "Buy to Let");
    }
}
