use crate::cli::ServeArgs;
use crate::infra::{bouw_infrastructuur, seed_demo_data, AppState};
use crate::routes::platform_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use securyflex::config::AppConfig;
use securyflex::error::AppError;
use securyflex::telemetry;
use tracing::info;

const FANOUT_INTERVAL: Duration = Duration::from_secs(2);

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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let infra = bouw_infrastructuur(config.platform.clone(), &config.cache);
    if args.seed {
        seed_demo_data(&infra);
    }

    // Outbox delivery loop: events recorded by the stores are fanned out
    // here, decoupled from the request that produced them.
    let worker = infra.worker.clone();
    let cache = infra.cache.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(FANOUT_INTERVAL).await;
            let summary = worker.run_once(Utc::now());
            if summary.verwerkt > 0 {
                cache.invalidate_prefix("dashboard:");
            }
        }
    });

    let app = platform_router(&infra, config.finqle.webhook_secret.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "securyflex marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
