use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use clientdesk::config::AppConfig;
use clientdesk::error::AppError;
use clientdesk::sessions::WizardSessionService;
use clientdesk::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_session_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let state = AppState::new(Arc::new(prometheus_handle));
    let readiness = state.readiness.clone();
    let service = Arc::new(WizardSessionService::standard());

    let app = with_session_routes(service)
        .layer(prometheus_layer)
        .layer(Extension(state));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);

    info!(?config.environment, %addr, "client desk console ready");

    axum::serve(listener, app).await?;
    Ok(())
}
