//! In-memory adapters behind the storage and delivery traits. The real
//! database, auth provider, broadcast transport, and message channels are
//! external collaborators; these stand-ins keep the service self-contained.

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{debug, info};

use securyflex::accounts::{
    AccountStore, ApplicantProfiel, BedrijfProfile, LicentieProfiel, NdNummerStatus,
    OpdrachtgeverProfile, SessionStore, TeamLid, User, UserId, UserRole, ZzpProfile,
};
use securyflex::cache::QueryCache;
use securyflex::config::{CacheConfig, PlatformConfig};
use securyflex::marketplace::domain::{
    Opdracht, OpdrachtId, OpdrachtStatus, Sollicitatie, SollicitatieId, SollicitatieStatus,
    Werkuur,
};
use securyflex::marketplace::store::{AcceptDirective, AcceptResult, MarketplaceStore};
use securyflex::marketplace::MarketplaceService;
use securyflex::notifications::domain::{
    LifecycleEvent, NdNummerAuditEntry, Notification, NotificationId,
};
use securyflex::notifications::outbox::{EventOutbox, InMemoryOutbox};
use securyflex::notifications::store::{
    AuditLog, BroadcastPublisher, ChannelDispatcher, ChannelMessage, DispatchError,
    NotificationStore,
};
use securyflex::notifications::{ComplianceSweep, FanoutWorker};
use securyflex::payments::{PaymentService, PaymentStore};
use securyflex::payments::domain::{Betaling, Factuur, FactuurId, FactuurStatus};
use securyflex::store::StoreError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct MarketplaceInner {
    opdrachten: HashMap<OpdrachtId, Opdracht>,
    sollicitaties: HashMap<SollicitatieId, Sollicitatie>,
    werkuren: Vec<Werkuur>,
}

/// Marketplace storage guarded by one mutex; every mutation records its
/// lifecycle events before the lock is released, so the outbox never holds
/// an event for an uncommitted change.
pub(crate) struct InMemoryMarketplaceStore {
    inner: Mutex<MarketplaceInner>,
    outbox: Arc<InMemoryOutbox>,
}

impl InMemoryMarketplaceStore {
    pub(crate) fn new(outbox: Arc<InMemoryOutbox>) -> Self {
        Self {
            inner: Mutex::new(MarketplaceInner::default()),
            outbox,
        }
    }
}

impl MarketplaceStore for InMemoryMarketplaceStore {
    fn insert_opdracht(
        &self,
        opdracht: Opdracht,
        events: Vec<LifecycleEvent>,
    ) -> Result<Opdracht, StoreError> {
        let mut inner = self.inner.lock().expect("marketplace mutex poisoned");
        if inner.opdrachten.contains_key(&opdracht.id) {
            return Err(StoreError::Conflict);
        }
        inner.opdrachten.insert(opdracht.id.clone(), opdracht.clone());
        self.outbox.append_batch(events, Utc::now());
        Ok(opdracht)
    }

    fn fetch_opdracht(&self, id: &OpdrachtId) -> Result<Option<Opdracht>, StoreError> {
        let inner = self.inner.lock().expect("marketplace mutex poisoned");
        Ok(inner.opdrachten.get(id).cloned())
    }

    fn list_opdrachten(&self) -> Result<Vec<Opdracht>, StoreError> {
        let inner = self.inner.lock().expect("marketplace mutex poisoned");
        Ok(inner.opdrachten.values().cloned().collect())
    }

    fn update_opdracht_status(
        &self,
        id: &OpdrachtId,
        naar: OpdrachtStatus,
        events: Vec<LifecycleEvent>,
    ) -> Result<Opdracht, StoreError> {
        let mut inner = self.inner.lock().expect("marketplace mutex poisoned");
        let opdracht = inner.opdrachten.get_mut(id).ok_or(StoreError::NotFound)?;
        opdracht.status = naar;
        let bijgewerkt = opdracht.clone();
        self.outbox.append_batch(events, Utc::now());
        Ok(bijgewerkt)
    }

    fn insert_sollicitatie(
        &self,
        sollicitatie: Sollicitatie,
        events: Vec<LifecycleEvent>,
    ) -> Result<Sollicitatie, StoreError> {
        let mut inner = self.inner.lock().expect("marketplace mutex poisoned");
        let dubbel = inner.sollicitaties.values().any(|bestaand| {
            bestaand.opdracht_id == sollicitatie.opdracht_id
                && bestaand.sollicitant.user_id() == sollicitatie.sollicitant.user_id()
        });
        if dubbel {
            return Err(StoreError::Conflict);
        }
        inner
            .sollicitaties
            .insert(sollicitatie.id.clone(), sollicitatie.clone());
        self.outbox.append_batch(events, Utc::now());
        Ok(sollicitatie)
    }

    fn fetch_sollicitatie(&self, id: &SollicitatieId) -> Result<Option<Sollicitatie>, StoreError> {
        let inner = self.inner.lock().expect("marketplace mutex poisoned");
        Ok(inner.sollicitaties.get(id).cloned())
    }

    fn sollicitaties_voor_opdracht(
        &self,
        id: &OpdrachtId,
    ) -> Result<Vec<Sollicitatie>, StoreError> {
        let inner = self.inner.lock().expect("marketplace mutex poisoned");
        Ok(inner
            .sollicitaties
            .values()
            .filter(|sollicitatie| &sollicitatie.opdracht_id == id)
            .cloned()
            .collect())
    }

    fn accept_sollicitatie(
        &self,
        id: &SollicitatieId,
        directive: AcceptDirective,
    ) -> Result<AcceptResult, StoreError> {
        let mut inner = self.inner.lock().expect("marketplace mutex poisoned");

        let sollicitatie = inner
            .sollicitaties
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        if sollicitatie.status != SollicitatieStatus::Pending {
            return Err(StoreError::Conflict);
        }
        let mut opdracht = inner
            .opdrachten
            .get(&sollicitatie.opdracht_id)
            .cloned()
            .ok_or(StoreError::NotFound)?;

        let geaccepteerd = inner
            .sollicitaties
            .values()
            .filter(|kandidaat| kandidaat.opdracht_id == sollicitatie.opdracht_id)
            .filter(|kandidaat| kandidaat.status == SollicitatieStatus::Accepted)
            .count() as u32;
        if geaccepteerd >= opdracht.aantal_beveiligers {
            return Err(StoreError::Conflict);
        }

        let mut geaccepteerde = sollicitatie;
        geaccepteerde.status = SollicitatieStatus::Accepted;
        inner
            .sollicitaties
            .insert(geaccepteerde.id.clone(), geaccepteerde.clone());

        let mut toegewezen = false;
        let mut werkuur = None;

        if let Some(bedrijf) = directive.set_accepted_bedrijf {
            opdracht.accepted_bedrijf = Some(bedrijf);
            opdracht.status = OpdrachtStatus::Toegewezen;
            toegewezen = true;
        }

        if geaccepteerd + 1 >= opdracht.aantal_beveiligers {
            if let Some(bij_volledig) = directive.bij_volledig {
                if bij_volledig.markeer_toegewezen {
                    opdracht.status = OpdrachtStatus::Toegewezen;
                    toegewezen = true;
                }
                if let Some(nieuw) = bij_volledig.werkuur {
                    inner.werkuren.push(nieuw.clone());
                    werkuur = Some(nieuw);
                }
            }
        }

        inner
            .opdrachten
            .insert(opdracht.id.clone(), opdracht.clone());

        let mut events = directive.events;
        if toegewezen {
            events.extend(directive.events_bij_toewijzing);
        }
        self.outbox.append_batch(events, Utc::now());

        Ok(AcceptResult {
            sollicitatie: geaccepteerde,
            opdracht,
            werkuur,
        })
    }

    fn reject_sollicitatie(
        &self,
        id: &SollicitatieId,
        events: Vec<LifecycleEvent>,
    ) -> Result<Sollicitatie, StoreError> {
        let mut inner = self.inner.lock().expect("marketplace mutex poisoned");
        let sollicitatie = inner.sollicitaties.get_mut(id).ok_or(StoreError::NotFound)?;
        if sollicitatie.status != SollicitatieStatus::Pending {
            return Err(StoreError::Conflict);
        }
        sollicitatie.status = SollicitatieStatus::Rejected;
        let afgewezen = sollicitatie.clone();
        self.outbox.append_batch(events, Utc::now());
        Ok(afgewezen)
    }

    fn werkuren_voor_opdracht(&self, id: &OpdrachtId) -> Result<Vec<Werkuur>, StoreError> {
        let inner = self.inner.lock().expect("marketplace mutex poisoned");
        Ok(inner
            .werkuren
            .iter()
            .filter(|werkuur| &werkuur.opdracht_id == id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct AccountsInner {
    users: HashMap<UserId, User>,
    zzp: HashMap<UserId, ZzpProfile>,
    bedrijven: HashMap<UserId, BedrijfProfile>,
    opdrachtgevers: HashMap<UserId, OpdrachtgeverProfile>,
}

pub(crate) struct InMemoryAccountStore {
    inner: Mutex<AccountsInner>,
    outbox: Arc<InMemoryOutbox>,
}

impl InMemoryAccountStore {
    pub(crate) fn new(outbox: Arc<InMemoryOutbox>) -> Self {
        Self {
            inner: Mutex::new(AccountsInner::default()),
            outbox,
        }
    }

    pub(crate) fn registreer_user(&self, user: User) {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.users.insert(user.id.clone(), user);
    }

    pub(crate) fn registreer_zzp(&self, profiel: ZzpProfile) {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.zzp.insert(profiel.user_id.clone(), profiel);
    }

    pub(crate) fn registreer_bedrijf(&self, profiel: BedrijfProfile) {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.bedrijven.insert(profiel.user_id.clone(), profiel);
    }

    pub(crate) fn registreer_opdrachtgever(&self, profiel: OpdrachtgeverProfile) {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.opdrachtgevers.insert(profiel.user_id.clone(), profiel);
    }
}

impl AccountStore for InMemoryAccountStore {
    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().expect("accounts mutex poisoned");
        Ok(inner.users.get(id).cloned())
    }

    fn applicant_profiel(&self, id: &UserId) -> Result<Option<ApplicantProfiel>, StoreError> {
        let inner = self.inner.lock().expect("accounts mutex poisoned");
        if let Some(profiel) = inner.zzp.get(id) {
            return Ok(Some(ApplicantProfiel::Zzp(profiel.clone())));
        }
        if let Some(profiel) = inner.bedrijven.get(id) {
            return Ok(Some(ApplicantProfiel::Bedrijf(profiel.clone())));
        }
        Ok(None)
    }

    fn bedrijf_profiel(&self, id: &UserId) -> Result<Option<BedrijfProfile>, StoreError> {
        let inner = self.inner.lock().expect("accounts mutex poisoned");
        Ok(inner.bedrijven.get(id).cloned())
    }

    fn opdrachtgever_profiel(
        &self,
        id: &UserId,
    ) -> Result<Option<OpdrachtgeverProfile>, StoreError> {
        let inner = self.inner.lock().expect("accounts mutex poisoned");
        Ok(inner.opdrachtgevers.get(id).cloned())
    }

    fn licentie_profielen(&self) -> Result<Vec<LicentieProfiel>, StoreError> {
        let inner = self.inner.lock().expect("accounts mutex poisoned");
        let zzp = inner
            .zzp
            .values()
            .filter(|profiel| profiel.nd_nummer.is_some())
            .map(|profiel| LicentieProfiel {
                user_id: profiel.user_id.clone(),
                naam: profiel.naam.clone(),
                nd_nummer_status: profiel.nd_nummer_status,
                nd_nummer_verval_datum: profiel.nd_nummer_verval_datum,
            });
        let bedrijven = inner
            .bedrijven
            .values()
            .filter(|profiel| profiel.nd_nummer.is_some())
            .map(|profiel| LicentieProfiel {
                user_id: profiel.user_id.clone(),
                naam: profiel.bedrijfsnaam.clone(),
                nd_nummer_status: profiel.nd_nummer_status,
                nd_nummer_verval_datum: profiel.nd_nummer_verval_datum,
            });
        Ok(zzp.chain(bedrijven).collect())
    }

    fn update_nd_nummer_status(
        &self,
        id: &UserId,
        naar: NdNummerStatus,
        events: Vec<LifecycleEvent>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        if let Some(profiel) = inner.zzp.get_mut(id) {
            profiel.nd_nummer_status = naar;
        } else if let Some(profiel) = inner.bedrijven.get_mut(id) {
            profiel.nd_nummer_status = naar;
        } else {
            return Err(StoreError::NotFound);
        }
        self.outbox.append_batch(events, Utc::now());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryNotificationStore {
    rows: Mutex<Vec<Notification>>,
}

impl NotificationStore for InMemoryNotificationStore {
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

    fn bestaat_recent(
        &self,
        event_key: &str,
        sinds: chrono::DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let rows = self.rows.lock().expect("notification mutex poisoned");
        Ok(rows
            .iter()
            .any(|row| row.event_key == event_key && row.created_at >= sinds))
    }
}

#[derive(Default)]
pub(crate) struct InMemoryAuditLog {
    entries: Mutex<Vec<NdNummerAuditEntry>>,
}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, entry: NdNummerAuditEntry) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
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

/// Broadcast adapter: the realtime transport is external, so live updates
/// are surfaced as structured log lines here.
#[derive(Default)]
pub(crate) struct LoggingBroadcast;

impl BroadcastPublisher for LoggingBroadcast {
    fn publish(&self, kanaal: &str, payload: serde_json::Value) -> Result<(), DispatchError> {
        debug!(%kanaal, %payload, "broadcast");
        Ok(())
    }
}

/// Channel adapter: e-mail/SMS/push delivery is an external collaborator;
/// messages are logged instead of sent.
#[derive(Default)]
pub(crate) struct LoggingChannelDispatcher;

impl ChannelDispatcher for LoggingChannelDispatcher {
    fn dispatch(&self, message: ChannelMessage) -> Result<(), DispatchError> {
        info!(
            kanaal = ?message.kanaal,
            user = %message.user_id.0,
            titel = %message.titel,
            "kanaalbericht"
        );
        Ok(())
    }
}

#[derive(Default)]
struct PaymentsInner {
    betalingen: HashMap<String, Betaling>,
    facturen: HashMap<FactuurId, Factuur>,
}

pub(crate) struct InMemoryPaymentStore {
    inner: Mutex<PaymentsInner>,
    outbox: Arc<InMemoryOutbox>,
}

impl InMemoryPaymentStore {
    pub(crate) fn new(outbox: Arc<InMemoryOutbox>) -> Self {
        Self {
            inner: Mutex::new(PaymentsInner::default()),
            outbox,
        }
    }
}

impl PaymentStore for InMemoryPaymentStore {
    fn fetch_betaling(&self, externe_id: &str) -> Result<Option<Betaling>, StoreError> {
        let inner = self.inner.lock().expect("payments mutex poisoned");
        Ok(inner.betalingen.get(externe_id).cloned())
    }

    fn upsert_betaling(
        &self,
        betaling: Betaling,
        events: Vec<LifecycleEvent>,
    ) -> Result<Betaling, StoreError> {
        let mut inner = self.inner.lock().expect("payments mutex poisoned");
        inner
            .betalingen
            .insert(betaling.externe_id.clone(), betaling.clone());
        self.outbox.append_batch(events, Utc::now());
        Ok(betaling)
    }

    fn fetch_factuur(&self, id: &FactuurId) -> Result<Option<Factuur>, StoreError> {
        let inner = self.inner.lock().expect("payments mutex poisoned");
        Ok(inner.facturen.get(id).cloned())
    }

    fn insert_factuur(&self, factuur: Factuur) -> Result<Factuur, StoreError> {
        let mut inner = self.inner.lock().expect("payments mutex poisoned");
        if inner.facturen.contains_key(&factuur.id) {
            return Err(StoreError::Conflict);
        }
        inner.facturen.insert(factuur.id.clone(), factuur.clone());
        Ok(factuur)
    }

    fn update_factuur_status(
        &self,
        id: &FactuurId,
        status: FactuurStatus,
        events: Vec<LifecycleEvent>,
    ) -> Result<Factuur, StoreError> {
        let mut inner = self.inner.lock().expect("payments mutex poisoned");
        let factuur = inner.facturen.get_mut(id).ok_or(StoreError::NotFound)?;
        factuur.status = status;
        let bijgewerkt = factuur.clone();
        self.outbox.append_batch(events, Utc::now());
        Ok(bijgewerkt)
    }
}

#[derive(Default)]
pub(crate) struct InMemorySessionStore {
    tokens: Mutex<HashMap<String, User>>,
}

impl InMemorySessionStore {
    pub(crate) fn login(&self, token: &str, user: User) {
        self.tokens
            .lock()
            .expect("session mutex poisoned")
            .insert(token.to_string(), user);
    }
}

impl SessionStore for InMemorySessionStore {
    fn resolve(&self, token: &str) -> Option<User> {
        self.tokens
            .lock()
            .expect("session mutex poisoned")
            .get(token)
            .cloned()
    }
}

pub(crate) type ApiMarketplaceService =
    MarketplaceService<InMemoryMarketplaceStore, InMemoryAccountStore>;
pub(crate) type ApiFanoutWorker = FanoutWorker<
    InMemoryOutbox,
    InMemoryNotificationStore,
    InMemoryAuditLog,
    LoggingBroadcast,
    LoggingChannelDispatcher,
>;
pub(crate) type ApiSweep =
    ComplianceSweep<InMemoryAccountStore, InMemoryNotificationStore, InMemoryOutbox>;
pub(crate) type ApiPaymentService = PaymentService<InMemoryPaymentStore>;

/// Every adapter and service the HTTP surface needs, wired together.
pub(crate) struct Infrastructuur {
    pub(crate) accounts: Arc<InMemoryAccountStore>,
    pub(crate) sessions: Arc<InMemorySessionStore>,
    pub(crate) notifications: Arc<InMemoryNotificationStore>,
    pub(crate) marketplace: Arc<ApiMarketplaceService>,
    pub(crate) payments: Arc<ApiPaymentService>,
    pub(crate) sweep: Arc<ApiSweep>,
    pub(crate) worker: Arc<ApiFanoutWorker>,
    pub(crate) cache: Arc<QueryCache>,
}

pub(crate) fn bouw_infrastructuur(
    platform: PlatformConfig,
    cache: &CacheConfig,
) -> Infrastructuur {
    let outbox = Arc::new(InMemoryOutbox::default());
    let accounts = Arc::new(InMemoryAccountStore::new(outbox.clone()));
    let sessions = Arc::new(InMemorySessionStore::default());
    let notifications = Arc::new(InMemoryNotificationStore::default());
    let audit = Arc::new(InMemoryAuditLog::default());
    let marketplace_store = Arc::new(InMemoryMarketplaceStore::new(outbox.clone()));
    let payment_store = Arc::new(InMemoryPaymentStore::new(outbox.clone()));

    let marketplace = Arc::new(MarketplaceService::new(
        marketplace_store,
        accounts.clone(),
        platform,
    ));
    let payments = Arc::new(PaymentService::new(payment_store));
    let sweep = Arc::new(ComplianceSweep::new(
        accounts.clone(),
        notifications.clone(),
        outbox.clone(),
    ));
    let worker = Arc::new(FanoutWorker::new(
        outbox,
        notifications.clone(),
        audit,
        Arc::new(LoggingBroadcast),
        Arc::new(LoggingChannelDispatcher),
    ));
    let query_cache = Arc::new(QueryCache::new(
        256,
        Duration::from_secs(cache.dashboard_ttl_seconds),
    ));

    Infrastructuur {
        accounts,
        sessions,
        notifications,
        marketplace,
        payments,
        sweep,
        worker,
        cache: query_cache,
    }
}

/// Development fixtures: three accounts with sessions named after their
/// role, one expiring license, and one already past its expiry.
pub(crate) fn seed_demo_data(infra: &Infrastructuur) {
    let vandaag = chrono::Local::now().date_naive();

    let zzp = User {
        id: UserId("u-zzp-1".to_string()),
        email: "guard@example.nl".to_string(),
        role: UserRole::ZzpBeveiliger,
        actief: true,
    };
    let bedrijf = User {
        id: UserId("u-bedrijf-1".to_string()),
        email: "planning@secureforce.nl".to_string(),
        role: UserRole::Bedrijf,
        actief: true,
    };
    let opdrachtgever = User {
        id: UserId("u-klant-1".to_string()),
        email: "inkoop@winkelcentrum.nl".to_string(),
        role: UserRole::Opdrachtgever,
        actief: true,
    };
    let admin = User {
        id: UserId("u-admin-1".to_string()),
        email: "beheer@securyflex.nl".to_string(),
        role: UserRole::Admin,
        actief: true,
    };

    infra.accounts.registreer_user(zzp.clone());
    infra.accounts.registreer_user(bedrijf.clone());
    infra.accounts.registreer_user(opdrachtgever.clone());
    infra.accounts.registreer_user(admin.clone());

    infra.accounts.registreer_zzp(ZzpProfile {
        user_id: zzp.id.clone(),
        naam: "Jan de Vries".to_string(),
        nd_nummer: Some("ND123456".to_string()),
        nd_nummer_status: NdNummerStatus::Actief,
        nd_nummer_verval_datum: Some(vandaag + chrono::Duration::days(25)),
    });
    infra.accounts.registreer_zzp(ZzpProfile {
        user_id: UserId("u-zzp-2".to_string()),
        naam: "Fatima el Idrissi".to_string(),
        nd_nummer: Some("ND222333".to_string()),
        nd_nummer_status: NdNummerStatus::Actief,
        nd_nummer_verval_datum: Some(vandaag - chrono::Duration::days(3)),
    });
    infra.accounts.registreer_bedrijf(BedrijfProfile {
        user_id: bedrijf.id.clone(),
        bedrijfsnaam: "SecureForce BV".to_string(),
        kvk_nummer: "87654321".to_string(),
        nd_nummer: Some("ND654321".to_string()),
        nd_nummer_status: NdNummerStatus::Actief,
        nd_nummer_verval_datum: Some(vandaag + chrono::Duration::days(400)),
        team_leden: vec![
            TeamLid {
                user_id: UserId("u-lid-1".to_string()),
                naam: "Ayse Yilmaz".to_string(),
                actief: true,
            },
            TeamLid {
                user_id: UserId("u-lid-2".to_string()),
                naam: "Piet Bakker".to_string(),
                actief: true,
            },
        ],
    });
    infra.accounts.registreer_opdrachtgever(OpdrachtgeverProfile {
        user_id: opdrachtgever.id.clone(),
        organisatie: "Winkelcentrum Zuidplein".to_string(),
    });

    infra.sessions.login("sessie-zzp", zzp);
    infra.sessions.login("sessie-bedrijf", bedrijf);
    infra.sessions.login("sessie-klant", opdrachtgever);
    infra.sessions.login("sessie-admin", admin);

    info!("demo data geladen: 4 accounts, sessies sessie-zzp/bedrijf/klant/admin");
}
