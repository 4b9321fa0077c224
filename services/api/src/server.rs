use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::compliance_routes;
use axum_prometheus::PrometheusMetricLayer;
use facility_compliance::config::AppConfig;
use facility_compliance::error::AppError;
use facility_compliance::{telemetry, SystemClock};
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let policy = config.deadlines.policy();
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        policy: Arc::new(policy),
        clock: Arc::new(SystemClock),
    };

    let app = compliance_routes(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        verification_days = config.deadlines.verification_due_soon_days,
        prescription_days = config.deadlines.prescription_due_soon_days,
        "compliance deadline service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
