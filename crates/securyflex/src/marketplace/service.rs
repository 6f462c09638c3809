use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::compliance::{beoordeel, ComplianceError, ComplianceSnapshot, ComplianceWarning};
use super::domain::{
    Besluit, Opdracht, OpdrachtCreator, OpdrachtDraft, OpdrachtFilter, OpdrachtId, OpdrachtStatus,
    OpdrachtView, Sollicitant, Sollicitatie, SollicitatieId, SollicitatiePayload,
    SollicitatieStatus, TargetAudience, Werkuur, WerkuurId, WerkuurStatus,
};
use super::store::{AcceptDirective, BijVolledig, MarketplaceStore};
use crate::accounts::{AccountStore, ApplicantProfiel, User, UserRole};
use crate::config::PlatformConfig;
use crate::notifications::domain::LifecycleEvent;
use crate::store::StoreError;

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

static OPDRACHT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static SOLLICITATIE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static WERKUUR_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_opdracht_id() -> OpdrachtId {
    let id = OPDRACHT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OpdrachtId(format!("opd-{id:06}"))
}

fn next_sollicitatie_id() -> SollicitatieId {
    let id = SOLLICITATIE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SollicitatieId(format!("sol-{id:06}"))
}

fn next_werkuur_id() -> WerkuurId {
    let id = WERKUUR_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    WerkuurId(format!("wrk-{id:06}"))
}

/// Error raised by the lifecycle controller. The router maps each variant
/// onto its HTTP status; unexpected storage failures stay generic.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("geen sollicitantprofiel gevonden voor deze gebruiker")]
    GeenProfiel,
    #[error("geen bedrijfs- of opdrachtgeverprofiel om opdrachten mee te plaatsen")]
    GeenCreatorProfiel,
    #[error(transparent)]
    Compliance(#[from] ComplianceError),
    #[error("opdracht niet gevonden")]
    OpdrachtNietGevonden,
    #[error("sollicitatie niet gevonden")]
    SollicitatieNietGevonden,
    #[error("deze opdracht staat niet open voor sollicitaties")]
    NietOpen,
    #[error("de doelgroep van deze opdracht staat dit type sollicitant niet toe")]
    DoelgroepNietToegestaan,
    #[error("teamgrootte {aangeboden} ligt onder het vereiste minimum van {minimum}")]
    TeamTeKlein { minimum: u32, aangeboden: u32 },
    #[error("er bestaat al een sollicitatie van deze sollicitant op deze opdracht")]
    DubbeleSollicitatie,
    #[error("alle plekken voor deze opdracht zijn al gevuld")]
    CapaciteitBereikt,
    #[error("over deze sollicitatie is al besloten")]
    AlBesloten,
    #[error("alleen de eigenaar van de opdracht mag dit doen")]
    GeenEigenaar,
    #[error("statusovergang van {} naar {} is niet toegestaan", van.label(), naar.label())]
    OngeldigeOvergang {
        van: OpdrachtStatus,
        naar: OpdrachtStatus,
    },
    #[error("validatiefout: {0}")]
    Validatie(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One listing page plus the compliance gate outcome.
#[derive(Debug, Clone, Serialize)]
pub struct OpdrachtenPagina {
    pub opdrachten: Vec<Opdracht>,
    pub totaal: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_warning: Option<ComplianceWarning>,
}

/// Result of an apply call, including auto-accept side effects.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyOutcome {
    pub sollicitatie: Sollicitatie,
    pub opdracht: Opdracht,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub werkuur: Option<Werkuur>,
    pub auto_accepted: bool,
}

/// Result of an owner decision on an application.
#[derive(Debug, Clone, Serialize)]
pub struct DecideOutcome {
    pub sollicitatie: Sollicitatie,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opdracht: Option<Opdracht>,
}

/// Aggregates behind the bedrijf dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BedrijfDashboardStats {
    pub open_opdrachten: usize,
    pub toegewezen_opdrachten: usize,
    pub openstaande_sollicitaties: usize,
    pub geaccepteerde_sollicitaties: usize,
    pub geplande_werkuren: usize,
}

/// Lifecycle controller for postings and applications. Loads the acting
/// user's profile, classifies its license, applies the business rules, and
/// hands the mutation plus its events to the store in one call.
pub struct MarketplaceService<S, A> {
    store: Arc<S>,
    accounts: Arc<A>,
    platform: PlatformConfig,
}

impl<S, A> MarketplaceService<S, A>
where
    S: MarketplaceStore + 'static,
    A: AccountStore + 'static,
{
    pub fn new(store: Arc<S>, accounts: Arc<A>, platform: PlatformConfig) -> Self {
        Self {
            store,
            accounts,
            platform,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Create a posting. An eigen-team posting by a bedrijf skips the open
    /// application phase entirely and lands on `Toegewezen` immediately.
    pub fn create(
        &self,
        actor: &User,
        mut draft: OpdrachtDraft,
        nu: DateTime<Utc>,
    ) -> Result<Opdracht, MarketplaceError> {
        let bedrijf = self.accounts.bedrijf_profiel(&actor.id)?;
        let creator = if let Some(profiel) = &bedrijf {
            OpdrachtCreator::Bedrijf(profiel.user_id.clone())
        } else if let Some(profiel) = self.accounts.opdrachtgever_profiel(&actor.id)? {
            OpdrachtCreator::Opdrachtgever(profiel.user_id)
        } else {
            return Err(MarketplaceError::GeenCreatorProfiel);
        };

        valideer_draft(&draft, self.platform.minimum_uurtarief_cent)?;

        if draft.target_audience == TargetAudience::EigenTeam && bedrijf.is_none() {
            return Err(MarketplaceError::Validatie(
                "eigen team vereist een bedrijfsprofiel".to_string(),
            ));
        }

        // Pre-assigned members outside the active roster are dropped, not
        // rejected.
        let toegewezen_team = match &bedrijf {
            Some(profiel) => {
                let roster: Vec<_> = profiel
                    .actieve_team_leden()
                    .map(|lid| lid.user_id.clone())
                    .collect();
                draft.team_leden.retain(|lid| roster.contains(lid));
                draft.team_leden.clone()
            }
            None => Vec::new(),
        };

        let eigen_team = draft.target_audience == TargetAudience::EigenTeam;
        let status = if !draft.publiceer {
            OpdrachtStatus::Draft
        } else if eigen_team {
            OpdrachtStatus::Toegewezen
        } else if draft.urgent {
            OpdrachtStatus::Urgent
        } else {
            OpdrachtStatus::Open
        };

        let accepted_bedrijf = match (&creator, status) {
            (OpdrachtCreator::Bedrijf(id), OpdrachtStatus::Toegewezen) => Some(id.clone()),
            _ => None,
        };

        let opdracht = Opdracht {
            id: next_opdracht_id(),
            titel: draft.titel.trim().to_string(),
            beschrijving: draft.beschrijving.trim().to_string(),
            locatie: draft.locatie.trim().to_string(),
            start_datum: draft.start_datum,
            eind_datum: draft.eind_datum,
            start_tijd: draft.start_tijd,
            eind_tijd: draft.eind_tijd,
            uurtarief_cent: draft.uurtarief_cent,
            aantal_beveiligers: draft.aantal_beveiligers,
            status,
            target_audience: draft.target_audience,
            direct_zzp_allowed: draft.direct_zzp_allowed,
            auto_accept: draft.auto_accept,
            min_team_grootte: draft.min_team_grootte,
            creator: creator.clone(),
            accepted_bedrijf,
            toegewezen_team,
            created_at: nu,
        };

        let events = if status == OpdrachtStatus::Toegewezen {
            vec![LifecycleEvent::OpdrachtToegewezen {
                opdracht_id: opdracht.id.clone(),
                eigenaar: creator.user_id().clone(),
                opdracht_titel: opdracht.titel.clone(),
            }]
        } else {
            Vec::new()
        };

        Ok(self.store.insert_opdracht(opdracht, events)?)
    }

    /// List postings. The `available` view is hard-gated on compliance: a
    /// non-compliant caller gets an empty page plus a structured warning,
    /// never partial results.
    pub fn list(
        &self,
        actor: &User,
        filter: &OpdrachtFilter,
        nu: DateTime<Utc>,
    ) -> Result<OpdrachtenPagina, MarketplaceError> {
        let alle = self.store.list_opdrachten()?;

        let zichtbaar: Vec<Opdracht> = match filter.view {
            OpdrachtView::Available => {
                let profiel = self
                    .accounts
                    .applicant_profiel(&actor.id)?
                    .ok_or(MarketplaceError::GeenProfiel)?;

                let (licentie_status, verval) = profiel.licentie();
                let report = beoordeel(licentie_status, verval, nu.date_naive());
                if !report.is_compliant {
                    return Ok(OpdrachtenPagina {
                        opdrachten: Vec::new(),
                        totaal: 0,
                        compliance_warning: Some(ComplianceWarning::van_report(&report)),
                    });
                }

                alle.into_iter()
                    .filter(|opdracht| {
                        opdracht.status.staat_open() && doelgroep_staat_toe(&profiel, opdracht)
                    })
                    .collect()
            }
            OpdrachtView::Eigen => {
                if actor.role == UserRole::Admin {
                    alle
                } else {
                    alle.into_iter()
                        .filter(|opdracht| opdracht.creator.user_id() == &actor.id)
                        .collect()
                }
            }
        };

        let mut gefilterd: Vec<Opdracht> = zichtbaar
            .into_iter()
            .filter(|opdracht| {
                filter
                    .status
                    .map(|status| opdracht.status == status)
                    .unwrap_or(true)
            })
            .filter(|opdracht| {
                filter
                    .locatie
                    .as_ref()
                    .map(|zoek| {
                        opdracht
                            .locatie
                            .to_lowercase()
                            .contains(&zoek.to_lowercase())
                    })
                    .unwrap_or(true)
            })
            .collect();
        gefilterd.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let totaal = gefilterd.len();
        let offset = filter.offset.unwrap_or(0);
        let limit = filter
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let opdrachten = gefilterd.into_iter().skip(offset).take(limit).collect();

        Ok(OpdrachtenPagina {
            opdrachten,
            totaal,
            compliance_warning: None,
        })
    }

    /// Apply to a posting. Preconditions run in order and the first failure
    /// wins; a compliance block carries its own remediation URL.
    pub fn apply(
        &self,
        actor: &User,
        opdracht_id: &OpdrachtId,
        payload: SollicitatiePayload,
        nu: DateTime<Utc>,
    ) -> Result<ApplyOutcome, MarketplaceError> {
        let profiel = self
            .accounts
            .applicant_profiel(&actor.id)?
            .ok_or(MarketplaceError::GeenProfiel)?;

        let vandaag = nu.date_naive();
        let (licentie_status, verval) = profiel.licentie();
        let report = beoordeel(licentie_status, verval, vandaag);
        if !report.is_compliant {
            return Err(ComplianceError::van_report(&report).into());
        }

        let opdracht = self
            .store
            .fetch_opdracht(opdracht_id)?
            .ok_or(MarketplaceError::OpdrachtNietGevonden)?;

        if !opdracht.status.staat_open() {
            return Err(MarketplaceError::NietOpen);
        }

        if !doelgroep_staat_toe(&profiel, &opdracht) {
            return Err(MarketplaceError::DoelgroepNietToegestaan);
        }

        if let ApplicantProfiel::Bedrijf(bedrijf) = &profiel {
            if let Some(minimum) = opdracht.min_team_grootte {
                let aangeboden = payload
                    .team_grootte
                    .unwrap_or(bedrijf.actieve_team_leden().count() as u32);
                if aangeboden < minimum {
                    return Err(MarketplaceError::TeamTeKlein {
                        minimum,
                        aangeboden,
                    });
                }
            }
        }

        let sollicitant = match &profiel {
            ApplicantProfiel::Zzp(zzp) => Sollicitant::Zzp(zzp.user_id.clone()),
            ApplicantProfiel::Bedrijf(bedrijf) => Sollicitant::Bedrijf(bedrijf.user_id.clone()),
        };

        let sollicitatie_id = next_sollicitatie_id();
        let sollicitatie = Sollicitatie {
            id: sollicitatie_id.clone(),
            opdracht_id: opdracht.id.clone(),
            sollicitant: sollicitant.clone(),
            status: SollicitatieStatus::Pending,
            compliance_snapshot: ComplianceSnapshot::van_report(&report, vandaag),
            voorgesteld_tarief_cent: payload.voorgesteld_tarief_cent,
            team_grootte: payload.team_grootte,
            created_at: nu,
        };

        let sollicitatie = self
            .store
            .insert_sollicitatie(
                sollicitatie,
                vec![LifecycleEvent::SollicitatieCreated {
                    opdracht_id: opdracht.id.clone(),
                    sollicitatie_id,
                    sollicitant: actor.id.clone(),
                    eigenaar: opdracht.creator.user_id().clone(),
                    opdracht_titel: opdracht.titel.clone(),
                }],
            )
            .map_err(|err| match err {
                StoreError::Conflict => MarketplaceError::DubbeleSollicitatie,
                other => MarketplaceError::Store(other),
            })?;

        if !opdracht.auto_accept {
            return Ok(ApplyOutcome {
                sollicitatie,
                opdracht,
                werkuur: None,
                auto_accepted: false,
            });
        }

        // Auto-accept. The urgent fill path additionally marks the posting
        // `Toegewezen` and materializes a scheduled Werkuur for ZZP'ers.
        let werkuur = match (&sollicitant, opdracht.status) {
            (Sollicitant::Zzp(zzp_id), OpdrachtStatus::Urgent) => Some(Werkuur {
                id: next_werkuur_id(),
                opdracht_id: opdracht.id.clone(),
                zzp_user_id: zzp_id.clone(),
                datum: opdracht.start_datum,
                start_tijd: opdracht.start_tijd,
                eind_tijd: opdracht.eind_tijd,
                uurtarief_cent: opdracht.uurtarief_cent,
                status: WerkuurStatus::Gepland,
            }),
            _ => None,
        };

        let directive = AcceptDirective {
            set_accepted_bedrijf: None,
            bij_volledig: (opdracht.status == OpdrachtStatus::Urgent).then(|| BijVolledig {
                markeer_toegewezen: true,
                werkuur,
            }),
            events: vec![LifecycleEvent::SollicitatieAccepted {
                opdracht_id: opdracht.id.clone(),
                sollicitatie_id: sollicitatie.id.clone(),
                sollicitant: actor.id.clone(),
                opdracht_titel: opdracht.titel.clone(),
            }],
            events_bij_toewijzing: vec![LifecycleEvent::OpdrachtToegewezen {
                opdracht_id: opdracht.id.clone(),
                eigenaar: opdracht.creator.user_id().clone(),
                opdracht_titel: opdracht.titel.clone(),
            }],
        };

        match self.store.accept_sollicitatie(&sollicitatie.id, directive) {
            Ok(result) => Ok(ApplyOutcome {
                sollicitatie: result.sollicitatie,
                opdracht: result.opdracht,
                werkuur: result.werkuur,
                auto_accepted: true,
            }),
            Err(StoreError::Conflict) => {
                // Lost the race for the final slot; the application stays
                // pending for a manual decision.
                warn!(sollicitatie = %sollicitatie.id.0, "auto-accept verloor capaciteitsrace");
                Ok(ApplyOutcome {
                    sollicitatie,
                    opdracht,
                    werkuur: None,
                    auto_accepted: false,
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Owner decision on a pending application.
    pub fn decide(
        &self,
        reviewer: &User,
        sollicitatie_id: &SollicitatieId,
        besluit: Besluit,
    ) -> Result<DecideOutcome, MarketplaceError> {
        let sollicitatie = self
            .store
            .fetch_sollicitatie(sollicitatie_id)?
            .ok_or(MarketplaceError::SollicitatieNietGevonden)?;
        let opdracht = self
            .store
            .fetch_opdracht(&sollicitatie.opdracht_id)?
            .ok_or(MarketplaceError::OpdrachtNietGevonden)?;

        if opdracht.creator.user_id() != &reviewer.id {
            return Err(MarketplaceError::GeenEigenaar);
        }
        if sollicitatie.status != SollicitatieStatus::Pending {
            return Err(MarketplaceError::AlBesloten);
        }

        match besluit {
            Besluit::Accepteren => {
                let directive = AcceptDirective {
                    set_accepted_bedrijf: match &sollicitatie.sollicitant {
                        Sollicitant::Bedrijf(id) => Some(id.clone()),
                        Sollicitant::Zzp(_) => None,
                    },
                    bij_volledig: Some(BijVolledig {
                        markeer_toegewezen: true,
                        werkuur: None,
                    }),
                    events: vec![LifecycleEvent::SollicitatieAccepted {
                        opdracht_id: opdracht.id.clone(),
                        sollicitatie_id: sollicitatie.id.clone(),
                        sollicitant: sollicitatie.sollicitant.user_id().clone(),
                        opdracht_titel: opdracht.titel.clone(),
                    }],
                    events_bij_toewijzing: vec![LifecycleEvent::OpdrachtToegewezen {
                        opdracht_id: opdracht.id.clone(),
                        eigenaar: opdracht.creator.user_id().clone(),
                        opdracht_titel: opdracht.titel.clone(),
                    }],
                };

                let result = self
                    .store
                    .accept_sollicitatie(&sollicitatie.id, directive)
                    .map_err(|err| match err {
                        StoreError::Conflict => MarketplaceError::CapaciteitBereikt,
                        other => MarketplaceError::Store(other),
                    })?;

                Ok(DecideOutcome {
                    sollicitatie: result.sollicitatie,
                    opdracht: Some(result.opdracht),
                })
            }
            Besluit::Afwijzen => {
                let afgewezen = self.store.reject_sollicitatie(
                    &sollicitatie.id,
                    vec![LifecycleEvent::SollicitatieRejected {
                        opdracht_id: opdracht.id.clone(),
                        sollicitatie_id: sollicitatie.id.clone(),
                        sollicitant: sollicitatie.sollicitant.user_id().clone(),
                        opdracht_titel: opdracht.titel.clone(),
                    }],
                )?;
                Ok(DecideOutcome {
                    sollicitatie: afgewezen,
                    opdracht: None,
                })
            }
        }
    }

    /// Owner-driven posting transitions (publish, start, complete, cancel).
    pub fn wijzig_status(
        &self,
        actor: &User,
        opdracht_id: &OpdrachtId,
        naar: OpdrachtStatus,
    ) -> Result<Opdracht, MarketplaceError> {
        let opdracht = self
            .store
            .fetch_opdracht(opdracht_id)?
            .ok_or(MarketplaceError::OpdrachtNietGevonden)?;

        if opdracht.creator.user_id() != &actor.id && actor.role != UserRole::Admin {
            return Err(MarketplaceError::GeenEigenaar);
        }
        if !opdracht.status.kan_overgaan_naar(naar) {
            return Err(MarketplaceError::OngeldigeOvergang {
                van: opdracht.status,
                naar,
            });
        }

        Ok(self
            .store
            .update_opdracht_status(opdracht_id, naar, Vec::new())?)
    }

    /// Aggregates for the bedrijf dashboard.
    pub fn bedrijf_stats(&self, actor: &User) -> Result<BedrijfDashboardStats, MarketplaceError> {
        let eigen: Vec<Opdracht> = self
            .store
            .list_opdrachten()?
            .into_iter()
            .filter(|opdracht| opdracht.creator.user_id() == &actor.id)
            .collect();

        let mut stats = BedrijfDashboardStats::default();
        for opdracht in &eigen {
            if opdracht.status.staat_open() {
                stats.open_opdrachten += 1;
            }
            if matches!(
                opdracht.status,
                OpdrachtStatus::Toegewezen | OpdrachtStatus::InProgress
            ) {
                stats.toegewezen_opdrachten += 1;
            }
            for sollicitatie in self.store.sollicitaties_voor_opdracht(&opdracht.id)? {
                match sollicitatie.status {
                    SollicitatieStatus::Pending => stats.openstaande_sollicitaties += 1,
                    SollicitatieStatus::Accepted => stats.geaccepteerde_sollicitaties += 1,
                    SollicitatieStatus::Rejected => {}
                }
            }
            stats.geplande_werkuren += self.store.werkuren_voor_opdracht(&opdracht.id)?.len();
        }
        Ok(stats)
    }
}

/// Audience rules: eigen-team postings never take open applications;
/// `direct_zzp_allowed` widens ZZP access on bedrijven-only postings.
fn doelgroep_staat_toe(profiel: &ApplicantProfiel, opdracht: &Opdracht) -> bool {
    match opdracht.target_audience {
        TargetAudience::EigenTeam => false,
        TargetAudience::Beiden => true,
        TargetAudience::AlleenZzp => !profiel.is_bedrijf(),
        TargetAudience::AlleenBedrijven => profiel.is_bedrijf() || opdracht.direct_zzp_allowed,
    }
}

fn valideer_draft(draft: &OpdrachtDraft, minimum_uurtarief: u32) -> Result<(), MarketplaceError> {
    if draft.titel.trim().is_empty() {
        return Err(MarketplaceError::Validatie("titel is verplicht".to_string()));
    }
    if draft.beschrijving.trim().is_empty() {
        return Err(MarketplaceError::Validatie(
            "beschrijving is verplicht".to_string(),
        ));
    }
    if draft.locatie.trim().is_empty() {
        return Err(MarketplaceError::Validatie(
            "locatie is verplicht".to_string(),
        ));
    }
    if draft.aantal_beveiligers == 0 {
        return Err(MarketplaceError::Validatie(
            "aantal beveiligers moet minimaal 1 zijn".to_string(),
        ));
    }
    if draft.uurtarief_cent < minimum_uurtarief {
        return Err(MarketplaceError::Validatie(format!(
            "uurtarief {} ligt onder het platformminimum van {} cent",
            draft.uurtarief_cent, minimum_uurtarief
        )));
    }
    if draft.eind_datum < draft.start_datum {
        return Err(MarketplaceError::Validatie(
            "einddatum ligt voor de startdatum".to_string(),
        ));
    }
    Ok(())
}
