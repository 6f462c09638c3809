use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::domain::{NdNummerAuditEntry, Notification, NotificationId};
use crate::accounts::UserId;
use crate::store::StoreError;

/// Storage abstraction over user-facing notification rows.
pub trait NotificationStore: Send + Sync {
    fn insert(&self, notification: Notification) -> Result<Notification, StoreError>;

    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, StoreError>;

    fn mark_read(&self, id: &NotificationId, user_id: &UserId) -> Result<(), StoreError>;

    /// Whether a notification with this `event_key` exists at or after
    /// `sinds`. Backs the sweep's 7-day de-duplication.
    fn bestaat_recent(&self, event_key: &str, sinds: DateTime<Utc>) -> Result<bool, StoreError>;
}

/// Append-only audit trail of license observations. Entries are never
/// updated or deleted.
pub trait AuditLog: Send + Sync {
    fn append(&self, entry: NdNummerAuditEntry) -> Result<(), StoreError>;

    fn entries_for(&self, user_id: &UserId) -> Result<Vec<NdNummerAuditEntry>, StoreError>;
}

/// Live-update fan-out towards connected dashboards. Best effort.
pub trait BroadcastPublisher: Send + Sync {
    fn publish(&self, kanaal: &str, payload: serde_json::Value) -> Result<(), DispatchError>;
}

/// External delivery channel for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kanaal {
    Email,
    Sms,
    Push,
}

/// A message bound for an external channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelMessage {
    pub kanaal: Kanaal,
    pub user_id: UserId,
    pub titel: String,
    pub bericht: String,
}

/// Outbound e-mail/SMS/push adapter. Best effort; failures are logged by
/// the caller and never abort delivery of the remaining work.
pub trait ChannelDispatcher: Send + Sync {
    fn dispatch(&self, message: ChannelMessage) -> Result<(), DispatchError>;
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("transport unavailable: {0}")]
    Transport(String),
}
