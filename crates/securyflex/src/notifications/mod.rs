//! Lifecycle-event fan-out: audit trail, notification rows, best-effort
//! broadcast and channel dispatch, plus the periodic compliance sweep.

pub mod domain;
pub mod fanout;
pub mod outbox;
pub mod router;
pub mod store;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use domain::{
    LifecycleEvent, NdNummerAuditEntry, Notification, NotificatieCategorie, NotificatiePrioriteit,
    NotificationId, WarningTier,
};
pub use fanout::{FanoutSummary, FanoutWorker};
pub use outbox::{EventOutbox, InMemoryOutbox, OutboxEntry};
pub use router::{notificatie_router, NotificatieRouterState};
pub use store::{
    AuditLog, BroadcastPublisher, ChannelDispatcher, ChannelMessage, DispatchError, Kanaal,
    NotificationStore,
};
pub use sweep::{ComplianceSweep, SweepReport};
