use std::sync::Arc;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{info, warn};

use super::domain::{
    Betaling, BetalingStatus, FactuurId, FactuurStatus, InvoiceEventData, PaymentEventData,
    WebhookEnvelope,
};
use super::store::PaymentStore;
use crate::accounts::UserId;
use crate::notifications::domain::LifecycleEvent;
use crate::store::StoreError;

type HmacSha256 = Hmac<Sha256>;

/// Verify an `x-finqle-signature` header value: hex-encoded HMAC-SHA256
/// over the raw request body.
pub fn verify_signature(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    let Ok(expected) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Compute the signature a sender would attach; used by tests and tooling.
pub fn sign_body(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// What happened to an accepted webhook body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verwerking {
    Verwerkt,
    /// Already at this state, or an event type we do not track.
    Genegeerd,
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("ongeldig event payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("onbekende factuur {0}")]
    FactuurOnbekend(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Applies Finqle webhook events to the mirrored payment state.
pub struct PaymentService<P> {
    store: Arc<P>,
}

impl<P> PaymentService<P>
where
    P: PaymentStore + 'static,
{
    pub fn new(store: Arc<P>) -> Self {
        Self { store }
    }

    /// Process one envelope. Idempotent: a redelivered event that matches
    /// the stored status is ignored without emitting anything.
    pub fn process(
        &self,
        envelope: WebhookEnvelope,
        nu: DateTime<Utc>,
    ) -> Result<Verwerking, WebhookError> {
        match envelope.event.as_str() {
            "payment.processing" => self.apply_payment(envelope, BetalingStatus::Processing, nu),
            "payment.paid" => self.apply_payment(envelope, BetalingStatus::Paid, nu),
            "payment.failed" => self.apply_payment(envelope, BetalingStatus::Failed, nu),
            "invoice.overdue" => self.apply_factuur(envelope, FactuurStatus::Achterstallig),
            onbekend => {
                info!(event = onbekend, "onbekend finqle event genegeerd");
                Ok(Verwerking::Genegeerd)
            }
        }
    }

    fn apply_payment(
        &self,
        envelope: WebhookEnvelope,
        status: BetalingStatus,
        nu: DateTime<Utc>,
    ) -> Result<Verwerking, WebhookError> {
        let data: PaymentEventData = serde_json::from_value(envelope.data)?;

        if let Some(bestaand) = self.store.fetch_betaling(&data.payment_id)? {
            if bestaand.status == status {
                info!(payment_id = %data.payment_id, "herbezorgd finqle event genegeerd");
                return Ok(Verwerking::Genegeerd);
            }
        }

        let ontvanger = UserId(data.vendor_id.clone());
        let betaling = Betaling {
            externe_id: data.payment_id.clone(),
            factuur_id: data.invoice_id.clone().map(FactuurId),
            ontvanger: ontvanger.clone(),
            bedrag_cent: data.amount_cents,
            status,
            bijgewerkt_op: nu,
        };

        self.store.upsert_betaling(
            betaling,
            vec![LifecycleEvent::PaymentStatusChanged {
                ontvanger,
                externe_betaling_id: data.payment_id.clone(),
                status,
            }],
        )?;

        if status == BetalingStatus::Paid {
            if let Some(invoice_id) = data.invoice_id {
                let factuur_id = FactuurId(invoice_id);
                if self.store.fetch_factuur(&factuur_id)?.is_some() {
                    self.store
                        .update_factuur_status(&factuur_id, FactuurStatus::Betaald, Vec::new())?;
                } else {
                    warn!(factuur = %factuur_id.0, "betaald event zonder bekende factuur");
                }
            }
        }

        Ok(Verwerking::Verwerkt)
    }

    fn apply_factuur(
        &self,
        envelope: WebhookEnvelope,
        status: FactuurStatus,
    ) -> Result<Verwerking, WebhookError> {
        let data: InvoiceEventData = serde_json::from_value(envelope.data)?;
        let factuur_id = FactuurId(data.invoice_id.clone());

        let Some(factuur) = self.store.fetch_factuur(&factuur_id)? else {
            return Err(WebhookError::FactuurOnbekend(data.invoice_id));
        };
        if factuur.status == status {
            return Ok(Verwerking::Genegeerd);
        }

        self.store
            .update_factuur_status(&factuur_id, status, Vec::new())?;
        Ok(Verwerking::Verwerkt)
    }
}
