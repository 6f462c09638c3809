use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::Value;

use crate::accounts::{
    AccountStore, ApplicantProfiel, BedrijfProfile, LicentieProfiel, NdNummerStatus,
    OpdrachtgeverProfile, SessionStore, TeamLid, User, UserId, UserRole, ZzpProfile,
};
use crate::config::PlatformConfig;
use crate::marketplace::domain::{
    Opdracht, OpdrachtDraft, OpdrachtId, OpdrachtStatus, Sollicitatie, SollicitatieId,
    SollicitatieStatus, TargetAudience, Werkuur,
};
use crate::marketplace::router::{marketplace_router, MarketplaceRouterState};
use crate::marketplace::service::MarketplaceService;
use crate::marketplace::store::{AcceptDirective, AcceptResult, MarketplaceStore};
use crate::notifications::domain::LifecycleEvent;
use crate::notifications::outbox::{EventOutbox, InMemoryOutbox};
use crate::store::StoreError;

pub(super) fn vandaag() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub(super) fn nu() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).single().expect("valid timestamp")
}

pub(super) fn datum(jaar: i32, maand: u32, dag: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(jaar, maand, dag).expect("valid date")
}

pub(super) fn tijd(uur: u32, minuut: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(uur, minuut, 0).expect("valid time")
}

pub(super) fn platform_config() -> PlatformConfig {
    PlatformConfig {
        minimum_uurtarief_cent: 1650,
    }
}

pub(super) fn zzp_user() -> User {
    User {
        id: UserId("u-zzp-1".to_string()),
        email: "guard@example.nl".to_string(),
        role: UserRole::ZzpBeveiliger,
        actief: true,
    }
}

pub(super) fn bedrijf_user() -> User {
    User {
        id: UserId("u-bedrijf-1".to_string()),
        email: "planning@secureforce.nl".to_string(),
        role: UserRole::Bedrijf,
        actief: true,
    }
}

pub(super) fn opdrachtgever_user() -> User {
    User {
        id: UserId("u-klant-1".to_string()),
        email: "inkoop@winkelcentrum.nl".to_string(),
        role: UserRole::Opdrachtgever,
        actief: true,
    }
}

pub(super) fn zzp_profiel(status: NdNummerStatus, verval: Option<NaiveDate>) -> ZzpProfile {
    ZzpProfile {
        user_id: zzp_user().id,
        naam: "Jan de Vries".to_string(),
        nd_nummer: Some("ND123456".to_string()),
        nd_nummer_status: status,
        nd_nummer_verval_datum: verval,
    }
}

pub(super) fn bedrijf_profiel(status: NdNummerStatus, verval: Option<NaiveDate>) -> BedrijfProfile {
    BedrijfProfile {
        user_id: bedrijf_user().id,
        bedrijfsnaam: "SecureForce BV".to_string(),
        kvk_nummer: "87654321".to_string(),
        nd_nummer: Some("ND654321".to_string()),
        nd_nummer_status: status,
        nd_nummer_verval_datum: verval,
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
            TeamLid {
                user_id: UserId("u-lid-3".to_string()),
                naam: "Oud Lid".to_string(),
                actief: false,
            },
        ],
    }
}

pub(super) fn opdracht_draft() -> OpdrachtDraft {
    OpdrachtDraft {
        titel: "Objectbeveiliging distributiecentrum".to_string(),
        beschrijving: "Nachtdienst toegangscontrole en surveillance.".to_string(),
        locatie: "Rotterdam".to_string(),
        start_datum: datum(2026, 3, 9),
        eind_datum: datum(2026, 3, 9),
        start_tijd: tijd(22, 0),
        eind_tijd: tijd(6, 0),
        uurtarief_cent: 2850,
        aantal_beveiligers: 2,
        target_audience: TargetAudience::Beiden,
        direct_zzp_allowed: false,
        auto_accept: false,
        min_team_grootte: None,
        urgent: false,
        publiceer: true,
        team_leden: Vec::new(),
    }
}

#[derive(Default)]
struct MarketplaceInner {
    opdrachten: HashMap<OpdrachtId, Opdracht>,
    sollicitaties: HashMap<SollicitatieId, Sollicitatie>,
    werkuren: Vec<Werkuur>,
}

/// In-memory store recording events in the same critical section as the
/// mutation, mirroring the outbox guarantee of the real adapter.
pub(super) struct MemoryMarketplaceStore {
    inner: Mutex<MarketplaceInner>,
    outbox: Arc<InMemoryOutbox>,
}

impl MemoryMarketplaceStore {
    pub(super) fn new(outbox: Arc<InMemoryOutbox>) -> Self {
        Self {
            inner: Mutex::new(MarketplaceInner::default()),
            outbox,
        }
    }

    pub(super) fn sollicitatie_count(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").sollicitaties.len()
    }
}

impl MarketplaceStore for MemoryMarketplaceStore {
    fn insert_opdracht(
        &self,
        opdracht: Opdracht,
        events: Vec<LifecycleEvent>,
    ) -> Result<Opdracht, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if inner.opdrachten.contains_key(&opdracht.id) {
            return Err(StoreError::Conflict);
        }
        inner.opdrachten.insert(opdracht.id.clone(), opdracht.clone());
        self.outbox.append_batch(events, Utc::now());
        Ok(opdracht)
    }

    fn fetch_opdracht(&self, id: &OpdrachtId) -> Result<Option<Opdracht>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.opdrachten.get(id).cloned())
    }

    fn list_opdrachten(&self) -> Result<Vec<Opdracht>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.opdrachten.values().cloned().collect())
    }

    fn update_opdracht_status(
        &self,
        id: &OpdrachtId,
        naar: OpdrachtStatus,
        events: Vec<LifecycleEvent>,
    ) -> Result<Opdracht, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
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
        let mut inner = self.inner.lock().expect("store mutex poisoned");
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
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.sollicitaties.get(id).cloned())
    }

    fn sollicitaties_voor_opdracht(
        &self,
        id: &OpdrachtId,
    ) -> Result<Vec<Sollicitatie>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
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
        let mut inner = self.inner.lock().expect("store mutex poisoned");

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
            .filter(|s| s.opdracht_id == sollicitatie.opdracht_id)
            .filter(|s| s.status == SollicitatieStatus::Accepted)
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
        let mut inner = self.inner.lock().expect("store mutex poisoned");
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
        let inner = self.inner.lock().expect("store mutex poisoned");
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

    pub(super) fn voeg_user_toe(&self, user: User) {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.users.insert(user.id.clone(), user);
    }

    pub(super) fn voeg_zzp_toe(&self, profiel: ZzpProfile) {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.zzp.insert(profiel.user_id.clone(), profiel);
    }

    pub(super) fn voeg_bedrijf_toe(&self, profiel: BedrijfProfile) {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.bedrijven.insert(profiel.user_id.clone(), profiel);
    }

    pub(super) fn voeg_opdrachtgever_toe(&self, profiel: OpdrachtgeverProfile) {
        let mut inner = self.inner.lock().expect("accounts mutex poisoned");
        inner.opdrachtgevers.insert(profiel.user_id.clone(), profiel);
    }
}

impl AccountStore for MemoryAccountStore {
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
        let zzp = inner.zzp.values().filter(|p| p.nd_nummer.is_some()).map(|p| {
            LicentieProfiel {
                user_id: p.user_id.clone(),
                naam: p.naam.clone(),
                nd_nummer_status: p.nd_nummer_status,
                nd_nummer_verval_datum: p.nd_nummer_verval_datum,
            }
        });
        let bedrijven = inner
            .bedrijven
            .values()
            .filter(|p| p.nd_nummer.is_some())
            .map(|p| LicentieProfiel {
                user_id: p.user_id.clone(),
                naam: p.bedrijfsnaam.clone(),
                nd_nummer_status: p.nd_nummer_status,
                nd_nummer_verval_datum: p.nd_nummer_verval_datum,
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
pub(super) struct MemorySessionStore {
    tokens: Mutex<HashMap<String, User>>,
}

impl MemorySessionStore {
    pub(super) fn login(&self, token: &str, user: User) {
        self.tokens
            .lock()
            .expect("session mutex poisoned")
            .insert(token.to_string(), user);
    }
}

impl SessionStore for MemorySessionStore {
    fn resolve(&self, token: &str) -> Option<User> {
        self.tokens
            .lock()
            .expect("session mutex poisoned")
            .get(token)
            .cloned()
    }
}

pub(super) struct TestOmgeving {
    pub(super) service: Arc<MarketplaceService<MemoryMarketplaceStore, MemoryAccountStore>>,
    pub(super) store: Arc<MemoryMarketplaceStore>,
    pub(super) accounts: Arc<MemoryAccountStore>,
    pub(super) outbox: Arc<InMemoryOutbox>,
    pub(super) sessions: Arc<MemorySessionStore>,
}

pub(super) fn omgeving() -> TestOmgeving {
    let outbox = Arc::new(InMemoryOutbox::default());
    let store = Arc::new(MemoryMarketplaceStore::new(outbox.clone()));
    let accounts = Arc::new(MemoryAccountStore::new(outbox.clone()));
    let sessions = Arc::new(MemorySessionStore::default());
    let service = Arc::new(MarketplaceService::new(
        store.clone(),
        accounts.clone(),
        platform_config(),
    ));
    TestOmgeving {
        service,
        store,
        accounts,
        outbox,
        sessions,
    }
}

/// Environment with a compliant ZZP'er, a compliant bedrijf, and an
/// opdrachtgever already registered.
pub(super) fn omgeving_met_profielen() -> TestOmgeving {
    let omgeving = omgeving();
    omgeving.accounts.voeg_user_toe(zzp_user());
    omgeving.accounts.voeg_user_toe(bedrijf_user());
    omgeving.accounts.voeg_user_toe(opdrachtgever_user());
    omgeving
        .accounts
        .voeg_zzp_toe(zzp_profiel(NdNummerStatus::Actief, Some(datum(2027, 1, 1))));
    omgeving.accounts.voeg_bedrijf_toe(bedrijf_profiel(
        NdNummerStatus::Actief,
        Some(datum(2027, 1, 1)),
    ));
    omgeving.accounts.voeg_opdrachtgever_toe(OpdrachtgeverProfile {
        user_id: opdrachtgever_user().id,
        organisatie: "Winkelcentrum Zuidplein".to_string(),
    });
    omgeving
}

pub(super) fn router_met(omgeving: &TestOmgeving) -> axum::Router {
    marketplace_router(MarketplaceRouterState {
        service: omgeving.service.clone(),
        sessions: omgeving.sessions.clone(),
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
