use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::accounts::{
    AccountStore, ApplicantProfiel, BedrijfProfile, LicentieProfiel, NdNummerStatus,
    OpdrachtgeverProfile, User, UserId, ZzpProfile,
};
use crate::notifications::domain::{NdNummerAuditEntry, Notification, NotificationId};
use crate::notifications::fanout::FanoutWorker;
use crate::notifications::outbox::{EventOutbox, InMemoryOutbox};
use crate::notifications::store::{
    AuditLog, BroadcastPublisher, ChannelDispatcher, ChannelMessage, DispatchError,
    NotificationStore,
};
use crate::notifications::sweep::ComplianceSweep;
use crate::store::StoreError;

pub(super) fn nu() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).single().expect("valid timestamp")
}

pub(super) fn datum(jaar: i32, maand: u32, dag: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(jaar, maand, dag).expect("valid date")
}

#[derive(Default)]
pub(super) struct MemoryNotificationStore {
    rows: Mutex<Vec<Notification>>,
}

impl MemoryNotificationStore {
    pub(super) fn rows(&self) -> Vec<Notification> {
        self.rows.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationStore for MemoryNotificationStore {
    fn insert(&self, notification: Notification) -> Result<Notification, StoreError> {
        let mut rows = self.rows.lock().expect("notification mutex poisoned");
        rows.push(notification.clone());
        Ok(notification)
    }

    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, StoreError> {
        let rows = self.rows.lock().expect("notification mutex poisoned");
        Ok(rows
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect())
    }

    fn mark_read(&self, id: &NotificationId, user_id: &UserId) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().expect("notification mutex poisoned");
        let row = rows
            .iter_mut()
            .find(|row| &row.id == id && &row.user_id == user_id)
            .ok_or(StoreError::NotFound)?;
        row.is_read = true;
        Ok(())
    }

    fn bestaat_recent(&self, event_key: &str, sinds: DateTime<Utc>) -> Result<bool, StoreError> {
        let rows = self.rows.lock().expect("notification mutex poisoned");
        Ok(rows
            .iter()
            .any(|row| row.event_key == event_key && row.created_at >= sinds))
    }
}

#[derive(Default)]
pub(super) struct MemoryAuditLog {
    entries: Mutex<Vec<NdNummerAuditEntry>>,
}

impl MemoryAuditLog {
    pub(super) fn entries(&self) -> Vec<NdNummerAuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditLog for MemoryAuditLog {
    fn append(&self, entry: NdNummerAuditEntry) -> Result<(), StoreError> {
        self.entries.lock().expect("audit mutex poisoned").push(entry);
        Ok(())
    }

    fn entries_for(&self, user_id: &UserId) -> Result<Vec<NdNummerAuditEntry>, StoreError> {
        let entries = self.entries.lock().expect("audit mutex poisoned");
        Ok(entries
            .iter()
            .filter(|entry| &entry.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryBroadcast {
    berichten: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MemoryBroadcast {
    pub(super) fn berichten(&self) -> Vec<(String, serde_json::Value)> {
        self.berichten.lock().expect("broadcast mutex poisoned").clone()
    }
}

impl BroadcastPublisher for MemoryBroadcast {
    fn publish(&self, kanaal: &str, payload: serde_json::Value) -> Result<(), DispatchError> {
        self.berichten
            .lock()
            .expect("broadcast mutex poisoned")
            .push((kanaal.to_string(), payload));
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryChannels {
    berichten: Mutex<Vec<ChannelMessage>>,
}

impl MemoryChannels {
    pub(super) fn berichten(&self) -> Vec<ChannelMessage> {
        self.berichten.lock().expect("channel mutex poisoned").clone()
    }
}

impl ChannelDispatcher for MemoryChannels {
    fn dispatch(&self, message: ChannelMessage) -> Result<(), DispatchError> {
        self.berichten
            .lock()
            .expect("channel mutex poisoned")
            .push(message);
        Ok(())
    }
}

/// Dispatcher that always fails, for best-effort delivery tests.
pub(super) struct BrokenChannels;

impl ChannelDispatcher for BrokenChannels {
    fn dispatch(&self, _message: ChannelMessage) -> Result<(), DispatchError> {
        Err(DispatchError::Transport("smtp offline".to_string()))
    }
}

#[derive(Default)]
struct AccountsInner {
    zzp: HashMap<UserId, ZzpProfile>,
}

/// Slim account store: only the license surface the sweep touches.
pub(super) struct MemoryAccountStore {
    inner: Mutex<AccountsInner>,
    outbox: Arc<InMemoryOutbox>,
}

impl MemoryAccountStore {
    pub(super) fn new(outbox: Arc<InMemoryOutbox>) -> Self {
        Self {
            inner: Mutex::new(AccountsInner::default()),
            outbox,
        }
    }

    pub(super) fn voeg_zzp_toe(&self, profiel: ZzpProfile) {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.zzp.insert(profiel.user_id.clone(), profiel);
    }

    pub(super) fn zzp_status(&self, id: &UserId) -> Option<NdNummerStatus> {
        let inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.zzp.get(id).map(|profiel| profiel.nd_nummer_status)
    }
}

impl AccountStore for MemoryAccountStore {
    fn fetch_user(&self, _id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(None)
    }

    fn applicant_profiel(&self, id: &UserId) -> Result<Option<ApplicantProfiel>, StoreError> {
        let inner = self.inner.lock().expect("accounts mutex poisoned");
        Ok(inner.zzp.get(id).cloned().map(ApplicantProfiel::Zzp))
    }

    fn bedrijf_profiel(&self, _id: &UserId) -> Result<Option<BedrijfProfile>, StoreError> {
        Ok(None)
    }

    fn opdrachtgever_profiel(
        &self,
        _id: &UserId,
    ) -> Result<Option<OpdrachtgeverProfile>, StoreError> {
        Ok(None)
    }

    fn licentie_profielen(&self) -> Result<Vec<LicentieProfiel>, StoreError> {
        let inner = self.inner.lock().expect("accounts mutex poisoned");
        Ok(inner
            .zzp
            .values()
            .filter(|profiel| profiel.nd_nummer.is_some())
            .map(|profiel| LicentieProfiel {
                user_id: profiel.user_id.clone(),
                naam: profiel.naam.clone(),
                nd_nummer_status: profiel.nd_nummer_status,
                nd_nummer_verval_datum: profiel.nd_nummer_verval_datum,
            })
            .collect())
    }

    fn update_nd_nummer_status(
        &self,
        id: &UserId,
        naar: NdNummerStatus,
        events: Vec<crate::notifications::domain::LifecycleEvent>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        let profiel = inner.zzp.get_mut(id).ok_or(StoreError::NotFound)?;
        profiel.nd_nummer_status = naar;
        self.outbox.append_batch(events, Utc::now());
        Ok(())
    }
}

pub(super) fn zzp_profiel(
    id: &str,
    status: NdNummerStatus,
    verval: Option<NaiveDate>,
) -> ZzpProfile {
    ZzpProfile {
        user_id: UserId(id.to_string()),
        naam: "Jan de Vries".to_string(),
        nd_nummer: Some("ND123456".to_string()),
        nd_nummer_status: status,
        nd_nummer_verval_datum: verval,
    }
}

pub(super) struct FanoutOmgeving {
    pub(super) outbox: Arc<InMemoryOutbox>,
    pub(super) notifications: Arc<MemoryNotificationStore>,
    pub(super) audit: Arc<MemoryAuditLog>,
    pub(super) broadcast: Arc<MemoryBroadcast>,
    pub(super) channels: Arc<MemoryChannels>,
    pub(super) worker: FanoutWorker<
        InMemoryOutbox,
        MemoryNotificationStore,
        MemoryAuditLog,
        MemoryBroadcast,
        MemoryChannels,
    >,
}

pub(super) fn fanout_omgeving() -> FanoutOmgeving {
    let outbox = Arc::new(InMemoryOutbox::default());
    let notifications = Arc::new(MemoryNotificationStore::default());
    let audit = Arc::new(MemoryAuditLog::default());
    let broadcast = Arc::new(MemoryBroadcast::default());
    let channels = Arc::new(MemoryChannels::default());
    let worker = FanoutWorker::new(
        outbox.clone(),
        notifications.clone(),
        audit.clone(),
        broadcast.clone(),
        channels.clone(),
    );
    FanoutOmgeving {
        outbox,
        notifications,
        audit,
        broadcast,
        channels,
        worker,
    }
}

pub(super) struct SweepOmgeving {
    pub(super) accounts: Arc<MemoryAccountStore>,
    pub(super) notifications: Arc<MemoryNotificationStore>,
    pub(super) outbox: Arc<InMemoryOutbox>,
    pub(super) sweep: ComplianceSweep<MemoryAccountStore, MemoryNotificationStore, InMemoryOutbox>,
}

pub(super) fn sweep_omgeving() -> SweepOmgeving {
    let outbox = Arc::new(InMemoryOutbox::default());
    let accounts = Arc::new(MemoryAccountStore::new(outbox.clone()));
    let notifications = Arc::new(MemoryNotificationStore::default());
    let sweep = ComplianceSweep::new(accounts.clone(), notifications.clone(), outbox.clone());
    SweepOmgeving {
        accounts,
        notifications,
        outbox,
        sweep,
    }
}
