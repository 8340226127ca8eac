use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use compass::assessment::sheet::CsvResponseStore;
use compass::assessment::{AssessmentRouterState, SubmissionService};
use compass::config::AppConfig;
use compass::error::AppError;
use compass::telemetry;
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
    if let Some(data_dir) = args.data_dir.take() {
        config.storage.data_dir = data_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(CsvResponseStore::new(&config.storage.data_dir)?);
    let service = Arc::new(SubmissionService::new(store));
    let router_state = AssessmentRouterState {
        service,
        toggle_key: config.admin.toggle_key.clone(),
    };

    let app = with_assessment_routes(router_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, data_dir = %config.storage.data_dir.display(), "assessment portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
