use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAssessmentStore, InMemoryLenderPanel};
use crate::routes::with_lender_search_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lender_match::config::AppConfig;
use lender_match::error::AppError;
use lender_match::telemetry;
use lender_match::workflows::adverse_credit::LenderSearchService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(panel) = args.panel.take() {
        config.panel.lender_panel_path = Some(panel);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let panels = Arc::new(InMemoryLenderPanel::load(
        config.panel.lender_panel_path.as_deref(),
    )?);
    let assessments = Arc::new(InMemoryAssessmentStore::default());
    let search_service = Arc::new(LenderSearchService::new(
        panels,
        assessments,
        config.panel.matching_config(),
    ));

    let app = with_lender_search_routes(search_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_product = %config.panel.default_product,
        "lender matching service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
