use std::sync::Arc;

use super::common::*;
use crate::accounts::{NdNummerStatus, UserId};
use crate::marketplace::compliance::RiskLevel;
use crate::marketplace::domain::{OpdrachtId, SollicitatieId};
use crate::notifications::domain::{
    LifecycleEvent, NotificatieCategorie, NotificatiePrioriteit, WarningTier,
};
use crate::notifications::fanout::FanoutWorker;
use crate::notifications::outbox::EventOutbox;
use crate::notifications::store::Kanaal;

fn accepted_event() -> LifecycleEvent {
    LifecycleEvent::SollicitatieAccepted {
        opdracht_id: OpdrachtId("opd-000001".to_string()),
        sollicitatie_id: SollicitatieId("sol-000001".to_string()),
        sollicitant: UserId("u-zzp-1".to_string()),
        opdracht_titel: "Objectbeveiliging".to_string(),
    }
}

fn status_changed_event() -> LifecycleEvent {
    LifecycleEvent::NdNummerStatusChanged {
        user_id: UserId("u-zzp-1".to_string()),
        naam: "Jan de Vries".to_string(),
        van: Some(NdNummerStatus::Actief),
        naar: NdNummerStatus::Verlopen,
        risk_level: RiskLevel::Critical,
    }
}

#[test]
fn accepted_event_levert_een_notificatie_zonder_audit() {
    let omgeving = fanout_omgeving();
    omgeving.outbox.append_batch(vec![accepted_event()], nu());

    let summary = omgeving.worker.run_once(nu());

    assert_eq!(summary.verwerkt, 1);
    assert_eq!(summary.notificaties, 1);
    assert_eq!(summary.audit_entries, 0);
    assert_eq!(summary.afleverfouten, 0);

    let rows = omgeving.notifications.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, UserId("u-zzp-1".to_string()));
    assert_eq!(rows[0].categorie, NotificatieCategorie::Sollicitatie);
    assert_eq!(rows[0].prioriteit, NotificatiePrioriteit::Hoog);
    assert!(!rows[0].is_read);
    assert!(omgeving.outbox.is_empty());
}

#[test]
fn licentie_event_schrijft_verplicht_een_audit_entry() {
    let omgeving = fanout_omgeving();
    assert!(status_changed_event().raakt_licentie());
    omgeving.outbox.append_batch(vec![status_changed_event()], nu());

    let summary = omgeving.worker.run_once(nu());

    assert_eq!(summary.audit_entries, 1);
    let entries = omgeving.audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].vorige_status, Some(NdNummerStatus::Actief));
    assert_eq!(entries[0].nieuwe_status, NdNummerStatus::Verlopen);
    assert_eq!(entries[0].risk_level, RiskLevel::Critical);
}

#[test]
fn urgente_notificaties_bereiken_alle_kanalen() {
    let omgeving = fanout_omgeving();
    omgeving.outbox.append_batch(vec![status_changed_event()], nu());

    omgeving.worker.run_once(nu());

    let kanalen: Vec<Kanaal> = omgeving
        .channels
        .berichten()
        .into_iter()
        .map(|bericht| bericht.kanaal)
        .collect();
    assert_eq!(kanalen, vec![Kanaal::Email, Kanaal::Sms, Kanaal::Push]);

    let broadcasts = omgeving.broadcast.berichten();
    assert_eq!(broadcasts.len(), 1);
    assert_eq!(broadcasts[0].0, "user:u-zzp-1");
}

#[test]
fn normale_prioriteit_blijft_in_app() {
    let omgeving = fanout_omgeving();
    omgeving.outbox.append_batch(
        vec![LifecycleEvent::SollicitatieCreated {
            opdracht_id: OpdrachtId("opd-000001".to_string()),
            sollicitatie_id: SollicitatieId("sol-000001".to_string()),
            sollicitant: UserId("u-zzp-1".to_string()),
            eigenaar: UserId("u-klant-1".to_string()),
            opdracht_titel: "Objectbeveiliging".to_string(),
        }],
        nu(),
    );

    omgeving.worker.run_once(nu());

    assert!(omgeving.channels.berichten().is_empty());
    let rows = omgeving.notifications.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, UserId("u-klant-1".to_string()));
}

#[test]
fn kanaalfouten_blokkeren_de_audit_en_notificatie_niet() {
    let outbox = Arc::new(crate::notifications::outbox::InMemoryOutbox::default());
    let notifications = Arc::new(MemoryNotificationStore::default());
    let audit = Arc::new(MemoryAuditLog::default());
    let broadcast = Arc::new(MemoryBroadcast::default());
    let worker = FanoutWorker::new(
        outbox.clone(),
        notifications.clone(),
        audit.clone(),
        broadcast.clone(),
        Arc::new(BrokenChannels),
    );
    outbox.append_batch(vec![status_changed_event()], nu());

    let summary = worker.run_once(nu());

    assert_eq!(summary.audit_entries, 1);
    assert_eq!(summary.notificaties, 1);
    assert!(summary.afleverfouten > 0);
    assert_eq!(audit.entries().len(), 1);
    assert_eq!(notifications.rows().len(), 1);
}

#[test]
fn vervalwaarschuwing_draagt_de_tier_in_de_event_key() {
    let omgeving = fanout_omgeving();
    omgeving.outbox.append_batch(
        vec![LifecycleEvent::NdNummerExpiryWarning {
            user_id: UserId("u-zzp-1".to_string()),
            naam: "Jan de Vries".to_string(),
            tier: WarningTier::Dagen30,
            dagen_resterend: 25,
            verval_datum: datum(2026, 3, 27),
        }],
        nu(),
    );

    omgeving.worker.run_once(nu());

    let rows = omgeving.notifications.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].event_key, "nd_warning_30:u-zzp-1");
    assert_eq!(rows[0].prioriteit, NotificatiePrioriteit::Urgent);
    assert_eq!(rows[0].categorie, NotificatieCategorie::Compliance);
}
