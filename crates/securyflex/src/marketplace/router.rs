use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{
    Besluit, OpdrachtDraft, OpdrachtFilter, OpdrachtId, OpdrachtStatus, OpdrachtView,
    SollicitatieId, SollicitatiePayload,
};
use super::service::{MarketplaceError, MarketplaceService};
use super::store::MarketplaceStore;
use crate::accounts::{bearer_token, AccountStore, SessionStore, User};
use crate::response::{failure, failure_with, success};

/// Router state for the marketplace endpoints.
pub struct MarketplaceRouterState<S, A> {
    pub service: Arc<MarketplaceService<S, A>>,
    pub sessions: Arc<dyn SessionStore>,
}

impl<S, A> Clone for MarketplaceRouterState<S, A> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

pub fn marketplace_router<S, A>(state: MarketplaceRouterState<S, A>) -> Router
where
    S: MarketplaceStore + 'static,
    A: AccountStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/opdrachten",
            get(list_handler::<S, A>).post(create_handler::<S, A>),
        )
        .route(
            "/api/v1/opdrachten/:opdracht_id/sollicitaties",
            post(apply_handler::<S, A>),
        )
        .route(
            "/api/v1/opdrachten/:opdracht_id/status",
            post(status_handler::<S, A>),
        )
        .route(
            "/api/v1/sollicitaties/:sollicitatie_id",
            patch(decide_handler::<S, A>),
        )
        .with_state(state)
}

fn actor<S, A>(
    state: &MarketplaceRouterState<S, A>,
    headers: &HeaderMap,
) -> Result<User, Response> {
    bearer_token(headers)
        .and_then(|token| state.sessions.resolve(token))
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "niet ingelogd"))
}

/// Map a lifecycle error onto its HTTP status. Compliance blocks keep
/// their remediation URL; storage failures stay generic on the wire.
fn error_response(err: MarketplaceError) -> Response {
    match err {
        MarketplaceError::Compliance(blokkade) => failure_with(
            StatusCode::FORBIDDEN,
            blokkade.to_string(),
            json!({ "action_url": blokkade.action_url() }),
        ),
        MarketplaceError::GeenProfiel
        | MarketplaceError::GeenCreatorProfiel
        | MarketplaceError::DoelgroepNietToegestaan
        | MarketplaceError::GeenEigenaar => failure(StatusCode::FORBIDDEN, err.to_string()),
        MarketplaceError::OpdrachtNietGevonden | MarketplaceError::SollicitatieNietGevonden => {
            failure(StatusCode::NOT_FOUND, err.to_string())
        }
        MarketplaceError::NietOpen
        | MarketplaceError::DubbeleSollicitatie
        | MarketplaceError::CapaciteitBereikt
        | MarketplaceError::AlBesloten
        | MarketplaceError::OngeldigeOvergang { .. } => {
            failure(StatusCode::CONFLICT, err.to_string())
        }
        MarketplaceError::TeamTeKlein { .. } | MarketplaceError::Validatie(_) => {
            failure(StatusCode::BAD_REQUEST, err.to_string())
        }
        MarketplaceError::Store(storage) => {
            error!(%storage, "opslagfout in marketplace");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "er ging iets mis")
        }
    }
}

/// Parse listing filters from the raw query string.
fn parse_filter(query: Option<&str>) -> Result<OpdrachtFilter, String> {
    let mut filter = OpdrachtFilter::default();
    let Some(query) = query else {
        return Ok(filter);
    };

    for paar in query.split('&').filter(|paar| !paar.is_empty()) {
        let (sleutel, waarde) = paar.split_once('=').unwrap_or((paar, ""));
        match sleutel {
            "view" => {
                filter.view = match waarde {
                    "available" => OpdrachtView::Available,
                    "eigen" | "" => OpdrachtView::Eigen,
                    anders => return Err(format!("onbekende view '{anders}'")),
                }
            }
            "status" => {
                filter.status = Some(parse_status(waarde)?);
            }
            "locatie" => {
                filter.locatie = Some(waarde.replace('+', " "));
            }
            "limit" => {
                filter.limit =
                    Some(waarde.parse().map_err(|_| "limit moet een getal zijn".to_string())?);
            }
            "offset" => {
                filter.offset =
                    Some(waarde.parse().map_err(|_| "offset moet een getal zijn".to_string())?);
            }
            _ => {}
        }
    }
    Ok(filter)
}

fn parse_status(waarde: &str) -> Result<OpdrachtStatus, String> {
    match waarde.to_ascii_uppercase().as_str() {
        "DRAFT" => Ok(OpdrachtStatus::Draft),
        "OPEN" => Ok(OpdrachtStatus::Open),
        "URGENT" => Ok(OpdrachtStatus::Urgent),
        "TOEGEWEZEN" => Ok(OpdrachtStatus::Toegewezen),
        "IN_PROGRESS" => Ok(OpdrachtStatus::InProgress),
        "COMPLETED" => Ok(OpdrachtStatus::Completed),
        "CANCELLED" => Ok(OpdrachtStatus::Cancelled),
        anders => Err(format!("onbekende status '{anders}'")),
    }
}

pub(crate) async fn list_handler<S, A>(
    State(state): State<MarketplaceRouterState<S, A>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response
where
    S: MarketplaceStore + 'static,
    A: AccountStore + 'static,
{
    let user = match actor(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let filter = match parse_filter(query.as_deref()) {
        Ok(filter) => filter,
        Err(bericht) => return failure(StatusCode::BAD_REQUEST, bericht),
    };

    match state.service.list(&user, &filter, Utc::now()) {
        Ok(pagina) => success(StatusCode::OK, pagina),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<S, A>(
    State(state): State<MarketplaceRouterState<S, A>>,
    headers: HeaderMap,
    Json(draft): Json<OpdrachtDraft>,
) -> Response
where
    S: MarketplaceStore + 'static,
    A: AccountStore + 'static,
{
    let user = match actor(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state.service.create(&user, draft, Utc::now()) {
        Ok(opdracht) => success(StatusCode::CREATED, opdracht),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn apply_handler<S, A>(
    State(state): State<MarketplaceRouterState<S, A>>,
    headers: HeaderMap,
    Path(opdracht_id): Path<String>,
    Json(payload): Json<SollicitatiePayload>,
) -> Response
where
    S: MarketplaceStore + 'static,
    A: AccountStore + 'static,
{
    let user = match actor(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let id = OpdrachtId(opdracht_id);
    match state.service.apply(&user, &id, payload, Utc::now()) {
        Ok(outcome) => success(StatusCode::CREATED, outcome),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BesluitPayload {
    pub(crate) besluit: Besluit,
}

pub(crate) async fn decide_handler<S, A>(
    State(state): State<MarketplaceRouterState<S, A>>,
    headers: HeaderMap,
    Path(sollicitatie_id): Path<String>,
    Json(payload): Json<BesluitPayload>,
) -> Response
where
    S: MarketplaceStore + 'static,
    A: AccountStore + 'static,
{
    let user = match actor(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let id = SollicitatieId(sollicitatie_id);
    match state.service.decide(&user, &id, payload.besluit) {
        Ok(outcome) => success(StatusCode::OK, outcome),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusPayload {
    pub(crate) status: OpdrachtStatus,
}

pub(crate) async fn status_handler<S, A>(
    State(state): State<MarketplaceRouterState<S, A>>,
    headers: HeaderMap,
    Path(opdracht_id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Response
where
    S: MarketplaceStore + 'static,
    A: AccountStore + 'static,
{
    let user = match actor(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let id = OpdrachtId(opdracht_id);
    match state.service.wijzig_status(&user, &id, payload.status) {
        Ok(opdracht) => success(StatusCode::OK, opdracht),
        Err(err) => error_response(err),
    }
}
