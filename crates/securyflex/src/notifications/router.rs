use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

use super::domain::NotificationId;
use super::store::NotificationStore;
use crate::accounts::{bearer_token, SessionStore, User};
use crate::response::{failure, success};
use crate::store::StoreError;

/// Router state for the notification endpoints.
pub struct NotificatieRouterState<N> {
    pub notifications: Arc<N>,
    pub sessions: Arc<dyn SessionStore>,
}

impl<N> Clone for NotificatieRouterState<N> {
    fn clone(&self) -> Self {
        Self {
            notifications: self.notifications.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

pub fn notificatie_router<N>(state: NotificatieRouterState<N>) -> Router
where
    N: NotificationStore + 'static,
{
    Router::new()
        .route("/api/v1/notificaties", get(list_handler::<N>))
        .route(
            "/api/v1/notificaties/:notification_id/gelezen",
            post(mark_read_handler::<N>),
        )
        .with_state(state)
}

fn actor<N>(state: &NotificatieRouterState<N>, headers: &HeaderMap) -> Result<User, Response> {
    bearer_token(headers)
        .and_then(|token| state.sessions.resolve(token))
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "niet ingelogd"))
}

pub(crate) async fn list_handler<N>(
    State(state): State<NotificatieRouterState<N>>,
    headers: HeaderMap,
) -> Response
where
    N: NotificationStore + 'static,
{
    let user = match actor(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state.notifications.list_for_user(&user.id) {
        Ok(notificaties) => success(StatusCode::OK, notificaties),
        Err(err) => {
            tracing::error!(%err, "notificaties ophalen mislukt");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "er ging iets mis")
        }
    }
}

pub(crate) async fn mark_read_handler<N>(
    State(state): State<NotificatieRouterState<N>>,
    headers: HeaderMap,
    Path(notification_id): Path<String>,
) -> Response
where
    N: NotificationStore + 'static,
{
    let user = match actor(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let id = NotificationId(notification_id);
    match state.notifications.mark_read(&id, &user.id) {
        Ok(()) => success(StatusCode::OK, serde_json::json!({ "gelezen": true })),
        Err(StoreError::NotFound) => failure(StatusCode::NOT_FOUND, "notificatie niet gevonden"),
        Err(err) => {
            tracing::error!(%err, "notificatie bijwerken mislukt");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "er ging iets mis")
        }
    }
}
