use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{Local, Utc};
use serde_json::json;
use tracing::error;

use securyflex::accounts::{bearer_token, AccountStore, SessionStore, User, UserRole};
use securyflex::cache::QueryCache;
use securyflex::marketplace::compliance::{beoordeel, ComplianceWarning};
use securyflex::marketplace::router::{marketplace_router, MarketplaceRouterState};
use securyflex::notifications::router::{notificatie_router, NotificatieRouterState};
use securyflex::payments::router::{webhook_router, WebhookRouterState};
use securyflex::response::{failure, success};

use crate::infra::{
    ApiFanoutWorker, ApiMarketplaceService, ApiSweep, AppState, InMemoryAccountStore,
    InMemorySessionStore, Infrastructuur,
};

/// State for the routes composed at the service layer: dashboard stats and
/// the compliance monitor.
#[derive(Clone)]
pub(crate) struct ApiContext {
    pub(crate) sessions: Arc<InMemorySessionStore>,
    pub(crate) accounts: Arc<InMemoryAccountStore>,
    pub(crate) marketplace: Arc<ApiMarketplaceService>,
    pub(crate) sweep: Arc<ApiSweep>,
    pub(crate) worker: Arc<ApiFanoutWorker>,
    pub(crate) cache: Arc<QueryCache>,
}

pub(crate) fn platform_router(
    infra: &Infrastructuur,
    webhook_secret: Option<String>,
) -> Router {
    let context = ApiContext {
        sessions: infra.sessions.clone(),
        accounts: infra.accounts.clone(),
        marketplace: infra.marketplace.clone(),
        sweep: infra.sweep.clone(),
        worker: infra.worker.clone(),
        cache: infra.cache.clone(),
    };

    marketplace_router(MarketplaceRouterState {
        service: infra.marketplace.clone(),
        sessions: infra.sessions.clone() as Arc<dyn SessionStore>,
    })
    .merge(notificatie_router(NotificatieRouterState {
        notifications: infra.notifications.clone(),
        sessions: infra.sessions.clone() as Arc<dyn SessionStore>,
    }))
    .merge(webhook_router(WebhookRouterState {
        service: infra.payments.clone(),
        secret: webhook_secret,
    }))
    .merge(
        Router::new()
            .route(
                "/api/v1/bedrijf/dashboard/stats",
                get(dashboard_stats_endpoint),
            )
            .route(
                "/api/v1/compliance/nd-nummer/monitor",
                get(monitor_endpoint).post(monitor_sweep_endpoint),
            )
            .with_state(context),
    )
    .route("/health", get(healthcheck))
    .route("/ready", get(readiness_endpoint))
    .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn actor(context: &ApiContext, headers: &HeaderMap) -> Result<User, Response> {
    bearer_token(headers)
        .and_then(|token| context.sessions.resolve(token))
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "niet ingelogd"))
}

/// Cached dashboard aggregates for bedrijven. The fan-out loop invalidates
/// the `dashboard:` prefix whenever lifecycle events land, so a hit is at
/// most one delivery cycle stale.
pub(crate) async fn dashboard_stats_endpoint(
    State(context): State<ApiContext>,
    headers: HeaderMap,
) -> Response {
    let user = match actor(&context, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    match context.accounts.bedrijf_profiel(&user.id) {
        Ok(Some(_)) => {}
        Ok(None) => return failure(StatusCode::FORBIDDEN, "alleen voor bedrijven"),
        Err(err) => {
            error!(%err, "bedrijfsprofiel ophalen mislukt");
            return failure(StatusCode::INTERNAL_SERVER_ERROR, "er ging iets mis");
        }
    }

    let sleutel = format!("dashboard:bedrijf:{}", user.id.0);
    if let Some(cached) = context.cache.get(&sleutel) {
        return success(StatusCode::OK, cached);
    }

    match context.marketplace.bedrijf_stats(&user) {
        Ok(stats) => match serde_json::to_value(&stats) {
            Ok(waarde) => {
                context.cache.put(sleutel, waarde.clone());
                success(StatusCode::OK, waarde)
            }
            Err(err) => {
                error!(%err, "stats serialiseren mislukt");
                failure(StatusCode::INTERNAL_SERVER_ERROR, "er ging iets mis")
            }
        },
        Err(err) => {
            error!(%err, "dashboard stats berekenen mislukt");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "er ging iets mis")
        }
    }
}

/// The caller's own license classification.
pub(crate) async fn monitor_endpoint(
    State(context): State<ApiContext>,
    headers: HeaderMap,
) -> Response {
    let user = match actor(&context, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let profiel = match context.accounts.applicant_profiel(&user.id) {
        Ok(Some(profiel)) => profiel,
        Ok(None) => return failure(StatusCode::FORBIDDEN, "geen profiel met ND-nummer"),
        Err(err) => {
            error!(%err, "profiel ophalen mislukt");
            return failure(StatusCode::INTERNAL_SERVER_ERROR, "er ging iets mis");
        }
    };

    let (status, verval) = profiel.licentie();
    let report = beoordeel(status, verval, Local::now().date_naive());
    let warning = (!report.is_compliant).then(|| ComplianceWarning::van_report(&report));
    success(
        StatusCode::OK,
        json!({ "report": report, "warning": warning }),
    )
}

/// Admin-triggered compliance sweep: reclassify every registered license,
/// demote expired profiles, queue tiered warnings, and deliver them.
pub(crate) async fn monitor_sweep_endpoint(
    State(context): State<ApiContext>,
    headers: HeaderMap,
) -> Response {
    let user = match actor(&context, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    if user.role != UserRole::Admin {
        return failure(StatusCode::FORBIDDEN, "alleen voor beheerders");
    }

    let nu = Utc::now();
    match context.sweep.run(nu) {
        Ok(rapport) => {
            let bezorging = context.worker.run_once(nu);
            context.cache.invalidate_prefix("dashboard:");
            success(
                StatusCode::OK,
                json!({
                    "sweep": rapport,
                    "bezorgd": {
                        "notificaties": bezorging.notificaties,
                        "audit_entries": bezorging.audit_entries,
                        "kanaal_berichten": bezorging.kanaal_berichten,
                    }
                }),
            )
        }
        Err(err) => {
            error!(%err, "compliance sweep mislukt");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "er ging iets mis")
        }
    }
}
