use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{error, warn};

use super::domain::{
    LifecycleEvent, NdNummerAuditEntry, Notification, NotificatieCategorie, NotificatiePrioriteit,
    NotificationId, WarningTier,
};
use super::outbox::EventOutbox;
use super::store::{
    AuditLog, BroadcastPublisher, ChannelDispatcher, ChannelMessage, Kanaal, NotificationStore,
};
use crate::accounts::{NdNummerStatus, UserId};

const DRAIN_BATCH: usize = 64;

static NOTIFICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_notification_id() -> NotificationId {
    let id = NOTIFICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    NotificationId(format!("ntf-{id:06}"))
}

/// Delivery tally for one drain pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FanoutSummary {
    pub verwerkt: usize,
    pub notificaties: usize,
    pub audit_entries: usize,
    pub kanaal_berichten: usize,
    pub afleverfouten: usize,
}

/// One planned notification row, before ids and timestamps are attached.
struct Bezorging {
    ontvanger: UserId,
    categorie: NotificatieCategorie,
    prioriteit: NotificatiePrioriteit,
    titel: String,
    bericht: String,
    event_key: String,
}

/// Drains the event outbox and performs delivery: mandatory audit entries
/// for license events, one notification row per affected user, then
/// best-effort broadcast and external channel dispatch. Broadcast and
/// channel failures are logged and never abort the pass.
pub struct FanoutWorker<O, N, A, B, C> {
    outbox: Arc<O>,
    notifications: Arc<N>,
    audit: Arc<A>,
    broadcast: Arc<B>,
    channels: Arc<C>,
}

impl<O, N, A, B, C> FanoutWorker<O, N, A, B, C>
where
    O: EventOutbox + 'static,
    N: NotificationStore + 'static,
    A: AuditLog + 'static,
    B: BroadcastPublisher + 'static,
    C: ChannelDispatcher + 'static,
{
    pub fn new(
        outbox: Arc<O>,
        notifications: Arc<N>,
        audit: Arc<A>,
        broadcast: Arc<B>,
        channels: Arc<C>,
    ) -> Self {
        Self {
            outbox,
            notifications,
            audit,
            broadcast,
            channels,
        }
    }

    /// Drain and deliver until the outbox is empty.
    pub fn run_once(&self, nu: DateTime<Utc>) -> FanoutSummary {
        let mut summary = FanoutSummary::default();
        loop {
            let batch = self.outbox.drain(DRAIN_BATCH);
            if batch.is_empty() {
                break;
            }
            for entry in batch {
                summary.verwerkt += 1;
                self.deliver(&entry.event, nu, &mut summary);
            }
        }
        summary
    }

    fn deliver(&self, event: &LifecycleEvent, nu: DateTime<Utc>, summary: &mut FanoutSummary) {
        if let Some(entry) = audit_entry(event, nu) {
            match self.audit.append(entry) {
                Ok(()) => summary.audit_entries += 1,
                Err(err) => {
                    // The audit trail is the one mandatory write; failure
                    // here is a storage-level incident, not a reason to
                    // drop the user-facing deliveries.
                    error!(%err, "audit append mislukt");
                    summary.afleverfouten += 1;
                }
            }
        }

        for plan in bezorgingen(event) {
            let notification = Notification {
                id: next_notification_id(),
                user_id: plan.ontvanger.clone(),
                categorie: plan.categorie,
                prioriteit: plan.prioriteit,
                titel: plan.titel.clone(),
                bericht: plan.bericht.clone(),
                event_key: plan.event_key.clone(),
                is_read: false,
                created_at: nu,
            };

            match self.notifications.insert(notification) {
                Ok(_) => summary.notificaties += 1,
                Err(err) => {
                    error!(%err, event_key = %plan.event_key, "notificatie opslaan mislukt");
                    summary.afleverfouten += 1;
                    continue;
                }
            }

            let topic = format!("user:{}", plan.ontvanger.0);
            if let Err(err) = self.broadcast.publish(
                &topic,
                json!({
                    "categorie": plan.categorie.label(),
                    "titel": plan.titel,
                    "bericht": plan.bericht,
                }),
            ) {
                warn!(%err, %topic, "broadcast mislukt");
                summary.afleverfouten += 1;
            }

            for kanaal in kanalen_voor(plan.prioriteit) {
                let message = ChannelMessage {
                    kanaal,
                    user_id: plan.ontvanger.clone(),
                    titel: plan.titel.clone(),
                    bericht: plan.bericht.clone(),
                };
                match self.channels.dispatch(message) {
                    Ok(()) => summary.kanaal_berichten += 1,
                    Err(err) => {
                        warn!(%err, ?kanaal, "kanaalbezorging mislukt");
                        summary.afleverfouten += 1;
                    }
                }
            }
        }
    }
}

/// External channels reached for a priority tier; lower tiers stay in-app.
fn kanalen_voor(prioriteit: NotificatiePrioriteit) -> Vec<Kanaal> {
    match prioriteit {
        NotificatiePrioriteit::Urgent => vec![Kanaal::Email, Kanaal::Sms, Kanaal::Push],
        NotificatiePrioriteit::Hoog => vec![Kanaal::Email, Kanaal::Push],
        NotificatiePrioriteit::Normaal | NotificatiePrioriteit::Laag => Vec::new(),
    }
}

/// The mandatory audit entry for license events; `None` otherwise.
fn audit_entry(event: &LifecycleEvent, nu: DateTime<Utc>) -> Option<NdNummerAuditEntry> {
    match event {
        LifecycleEvent::NdNummerStatusChanged {
            user_id,
            naam,
            van,
            naar,
            risk_level,
        } => Some(NdNummerAuditEntry {
            user_id: user_id.clone(),
            vorige_status: *van,
            nieuwe_status: *naar,
            risk_level: *risk_level,
            omschrijving: format!("ND-nummer van {naam} naar {} gezet", naar.label()),
            geregistreerd_op: nu,
        }),
        LifecycleEvent::NdNummerExpiryWarning {
            user_id,
            naam,
            tier,
            dagen_resterend,
            ..
        } => Some(NdNummerAuditEntry {
            user_id: user_id.clone(),
            vorige_status: Some(NdNummerStatus::Actief),
            nieuwe_status: NdNummerStatus::Actief,
            risk_level: risk_voor_tier(*tier),
            omschrijving: format!(
                "vervalwaarschuwing voor {naam}: nog {dagen_resterend} dagen geldig"
            ),
            geregistreerd_op: nu,
        }),
        _ => None,
    }
}

fn risk_voor_tier(tier: WarningTier) -> crate::marketplace::compliance::RiskLevel {
    use crate::marketplace::compliance::RiskLevel;
    match tier {
        WarningTier::Dagen30 => RiskLevel::High,
        WarningTier::Dagen60 | WarningTier::Dagen90 => RiskLevel::Medium,
    }
}

/// Plan the notification rows for an event: one per affected user.
fn bezorgingen(event: &LifecycleEvent) -> Vec<Bezorging> {
    match event {
        LifecycleEvent::SollicitatieCreated {
            sollicitatie_id,
            eigenaar,
            opdracht_titel,
            ..
        } => vec![Bezorging {
            ontvanger: eigenaar.clone(),
            categorie: NotificatieCategorie::Sollicitatie,
            prioriteit: NotificatiePrioriteit::Normaal,
            titel: "Nieuwe sollicitatie".to_string(),
            bericht: format!("Er is een nieuwe sollicitatie op '{opdracht_titel}'."),
            event_key: format!("sollicitatie_created:{}", sollicitatie_id.0),
        }],
        LifecycleEvent::SollicitatieAccepted {
            sollicitatie_id,
            sollicitant,
            opdracht_titel,
            ..
        } => vec![Bezorging {
            ontvanger: sollicitant.clone(),
            categorie: NotificatieCategorie::Sollicitatie,
            prioriteit: NotificatiePrioriteit::Hoog,
            titel: "Sollicitatie geaccepteerd".to_string(),
            bericht: format!("Uw sollicitatie op '{opdracht_titel}' is geaccepteerd."),
            event_key: format!("sollicitatie_accepted:{}", sollicitatie_id.0),
        }],
        LifecycleEvent::SollicitatieRejected {
            sollicitatie_id,
            sollicitant,
            opdracht_titel,
            ..
        } => vec![Bezorging {
            ontvanger: sollicitant.clone(),
            categorie: NotificatieCategorie::Sollicitatie,
            prioriteit: NotificatiePrioriteit::Normaal,
            titel: "Sollicitatie afgewezen".to_string(),
            bericht: format!("Uw sollicitatie op '{opdracht_titel}' is afgewezen."),
            event_key: format!("sollicitatie_rejected:{}", sollicitatie_id.0),
        }],
        LifecycleEvent::OpdrachtToegewezen {
            opdracht_id,
            eigenaar,
            opdracht_titel,
        } => vec![Bezorging {
            ontvanger: eigenaar.clone(),
            categorie: NotificatieCategorie::Opdracht,
            prioriteit: NotificatiePrioriteit::Hoog,
            titel: "Opdracht toegewezen".to_string(),
            bericht: format!("Alle plekken voor '{opdracht_titel}' zijn gevuld."),
            event_key: format!("opdracht_toegewezen:{}", opdracht_id.0),
        }],
        LifecycleEvent::NdNummerStatusChanged {
            user_id, naar, ..
        } => {
            let prioriteit = match naar {
                NdNummerStatus::Verlopen
                | NdNummerStatus::Geschorst
                | NdNummerStatus::Ingetrokken => NotificatiePrioriteit::Urgent,
                NdNummerStatus::Actief | NdNummerStatus::NietGeregistreerd => {
                    NotificatiePrioriteit::Normaal
                }
            };
            vec![Bezorging {
                ontvanger: user_id.clone(),
                categorie: NotificatieCategorie::Compliance,
                prioriteit,
                titel: "ND-nummer status gewijzigd".to_string(),
                bericht: format!("De status van uw ND-nummer is nu {}.", naar.label()),
                event_key: format!("nd_status:{}:{}", naar.label(), user_id.0),
            }]
        }
        LifecycleEvent::NdNummerExpiryWarning {
            user_id,
            tier,
            dagen_resterend,
            verval_datum,
            ..
        } => {
            let prioriteit = match tier {
                WarningTier::Dagen30 => NotificatiePrioriteit::Urgent,
                WarningTier::Dagen60 => NotificatiePrioriteit::Hoog,
                WarningTier::Dagen90 => NotificatiePrioriteit::Normaal,
            };
            vec![Bezorging {
                ontvanger: user_id.clone(),
                categorie: NotificatieCategorie::Compliance,
                prioriteit,
                titel: "ND-nummer verloopt binnenkort".to_string(),
                bericht: format!(
                    "Uw ND-nummer verloopt op {verval_datum} (over {dagen_resterend} dagen). Vernieuw uw registratie op tijd."
                ),
                event_key: format!("{}:{}", tier.label(), user_id.0),
            }]
        }
        LifecycleEvent::PaymentStatusChanged {
            ontvanger,
            externe_betaling_id,
            status,
        } => {
            let prioriteit = if status.is_mislukt() {
                NotificatiePrioriteit::Hoog
            } else {
                NotificatiePrioriteit::Normaal
            };
            vec![Bezorging {
                ontvanger: ontvanger.clone(),
                categorie: NotificatieCategorie::Betaling,
                prioriteit,
                titel: "Betaling bijgewerkt".to_string(),
                bericht: format!(
                    "Betaling {externe_betaling_id} heeft nu status {}.",
                    status.label()
                ),
                event_key: format!("betaling:{}:{}", externe_betaling_id, status.label()),
            }]
        }
    }
}
