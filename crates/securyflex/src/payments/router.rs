use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use chrono::Utc;
use serde_json::json;
use tracing::{error, warn};

use super::store::PaymentStore;
use super::webhook::{verify_signature, PaymentService};
use crate::response::{failure, success};

pub const SIGNATURE_HEADER: &str = "x-finqle-signature";

/// Router state for the Finqle webhook endpoint.
pub struct WebhookRouterState<P> {
    pub service: Arc<PaymentService<P>>,
    /// Shared secret; signature checks are skipped when absent.
    pub secret: Option<String>,
}

impl<P> Clone for WebhookRouterState<P> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            secret: self.secret.clone(),
        }
    }
}

pub fn webhook_router<P>(state: WebhookRouterState<P>) -> Router
where
    P: PaymentStore + 'static,
{
    Router::new()
        .route("/webhooks/finqle", post(finqle_handler::<P>))
        .with_state(state)
}

/// Inbound Finqle events. An invalid signature is the only rejection; every
/// processing failure is logged and still answered with 200 so Finqle does
/// not retry the delivery into duplicates.
pub(crate) async fn finqle_handler<P>(
    State(state): State<WebhookRouterState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    P: PaymentStore + 'static,
{
    if let Some(secret) = &state.secret {
        let geldig = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|signature| verify_signature(secret, &body, signature))
            .unwrap_or(false);
        if !geldig {
            return failure(StatusCode::UNAUTHORIZED, "ongeldige handtekening");
        }
    }

    let envelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(%err, "finqle webhook body niet te parsen");
            return success(StatusCode::OK, json!({ "received": true }));
        }
    };

    if let Err(err) = state.service.process(envelope, Utc::now()) {
        error!(%err, "finqle webhook verwerking mislukt");
    }
    success(StatusCode::OK, json!({ "received": true }))
}
