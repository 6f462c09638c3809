use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::UserId;
use crate::marketplace::domain::OpdrachtId;

/// Identifier wrapper for invoices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactuurId(pub String);

/// Payment state mirrored from Finqle; only webhook events mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetalingStatus {
    Processing,
    Paid,
    Failed,
}

impl BetalingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BetalingStatus::Processing => "PROCESSING",
            BetalingStatus::Paid => "PAID",
            BetalingStatus::Failed => "FAILED",
        }
    }

    pub const fn is_mislukt(self) -> bool {
        matches!(self, BetalingStatus::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactuurStatus {
    Open,
    Betaald,
    Achterstallig,
}

impl FactuurStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FactuurStatus::Open => "OPEN",
            FactuurStatus::Betaald => "BETAALD",
            FactuurStatus::Achterstallig => "ACHTERSTALLIG",
        }
    }
}

/// A payout tracked by its Finqle payment id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Betaling {
    pub externe_id: String,
    pub factuur_id: Option<FactuurId>,
    pub ontvanger: UserId,
    pub bedrag_cent: u64,
    pub status: BetalingStatus,
    pub bijgewerkt_op: DateTime<Utc>,
}

/// An invoice raised for completed work on a posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factuur {
    pub id: FactuurId,
    pub opdracht_id: OpdrachtId,
    pub ontvanger: UserId,
    pub bedrag_cent: u64,
    pub status: FactuurStatus,
}

/// Raw inbound webhook body: `{ event, timestamp, data }`, with the
/// signature travelling in the `x-finqle-signature` header.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    pub event: String,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

/// Payload shape for `payment.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEventData {
    pub payment_id: String,
    #[serde(default)]
    pub invoice_id: Option<String>,
    pub vendor_id: String,
    pub amount_cents: u64,
}

/// Payload shape for `invoice.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceEventData {
    pub invoice_id: String,
}
