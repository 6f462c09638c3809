use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::compliance::ComplianceSnapshot;
use crate::accounts::UserId;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpdrachtId(pub String);

/// Identifier wrapper for applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SollicitatieId(pub String);

/// Identifier wrapper for scheduled work-hour records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WerkuurId(pub String);

/// Lifecycle of a posting. `Toegewezen` is reached through accumulated
/// acceptances, or instantly for eigen-team postings. Nothing leaves
/// `Completed` or `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpdrachtStatus {
    Draft,
    Open,
    Urgent,
    Toegewezen,
    InProgress,
    Completed,
    Cancelled,
}

impl OpdrachtStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OpdrachtStatus::Draft => "DRAFT",
            OpdrachtStatus::Open => "OPEN",
            OpdrachtStatus::Urgent => "URGENT",
            OpdrachtStatus::Toegewezen => "TOEGEWEZEN",
            OpdrachtStatus::InProgress => "IN_PROGRESS",
            OpdrachtStatus::Completed => "COMPLETED",
            OpdrachtStatus::Cancelled => "CANCELLED",
        }
    }

    pub const fn is_terminaal(self) -> bool {
        matches!(self, OpdrachtStatus::Completed | OpdrachtStatus::Cancelled)
    }

    /// Postings only take applications while open or urgent.
    pub const fn staat_open(self) -> bool {
        matches!(self, OpdrachtStatus::Open | OpdrachtStatus::Urgent)
    }

    /// Transition table for the posting state machine.
    pub fn kan_overgaan_naar(self, naar: OpdrachtStatus) -> bool {
        use OpdrachtStatus::*;
        match (self, naar) {
            (Draft, Open) | (Draft, Urgent) => true,
            (Open, Toegewezen) | (Urgent, Toegewezen) => true,
            (Toegewezen, InProgress) => true,
            (InProgress, Completed) => true,
            (van, Cancelled) => !van.is_terminaal(),
            _ => false,
        }
    }
}

/// Restricts who may apply to a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetAudience {
    AlleenBedrijven,
    AlleenZzp,
    Beiden,
    EigenTeam,
}

impl TargetAudience {
    pub const fn label(self) -> &'static str {
        match self {
            TargetAudience::AlleenBedrijven => "ALLEEN_BEDRIJVEN",
            TargetAudience::AlleenZzp => "ALLEEN_ZZP",
            TargetAudience::Beiden => "BEIDEN",
            TargetAudience::EigenTeam => "EIGEN_TEAM",
        }
    }
}

/// Owner of a posting, resolved once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "user_id", rename_all = "snake_case")]
pub enum OpdrachtCreator {
    Opdrachtgever(UserId),
    Bedrijf(UserId),
}

impl OpdrachtCreator {
    pub fn user_id(&self) -> &UserId {
        match self {
            OpdrachtCreator::Opdrachtgever(id) => id,
            OpdrachtCreator::Bedrijf(id) => id,
        }
    }
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opdracht {
    pub id: OpdrachtId,
    pub titel: String,
    pub beschrijving: String,
    pub locatie: String,
    pub start_datum: NaiveDate,
    pub eind_datum: NaiveDate,
    pub start_tijd: NaiveTime,
    pub eind_tijd: NaiveTime,
    /// Hourly rate in euro cents, at or above the platform minimum.
    pub uurtarief_cent: u32,
    /// Required headcount; accepted applicants never exceed this.
    pub aantal_beveiligers: u32,
    pub status: OpdrachtStatus,
    pub target_audience: TargetAudience,
    pub direct_zzp_allowed: bool,
    pub auto_accept: bool,
    pub min_team_grootte: Option<u32>,
    pub creator: OpdrachtCreator,
    pub accepted_bedrijf: Option<UserId>,
    /// Pre-assigned roster members, filtered to the creator's active team.
    pub toegewezen_team: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

/// The party applying to a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "user_id", rename_all = "snake_case")]
pub enum Sollicitant {
    Zzp(UserId),
    Bedrijf(UserId),
}

impl Sollicitant {
    pub fn user_id(&self) -> &UserId {
        match self {
            Sollicitant::Zzp(id) => id,
            Sollicitant::Bedrijf(id) => id,
        }
    }

    pub const fn is_bedrijf(&self) -> bool {
        matches!(self, Sollicitant::Bedrijf(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SollicitatieStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SollicitatieStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SollicitatieStatus::Pending => "PENDING",
            SollicitatieStatus::Accepted => "ACCEPTED",
            SollicitatieStatus::Rejected => "REJECTED",
        }
    }
}

/// An application linking a sollicitant to a posting. At most one per
/// (opdracht, sollicitant) pair; the compliance snapshot preserves the
/// license state observed at application time for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sollicitatie {
    pub id: SollicitatieId,
    pub opdracht_id: OpdrachtId,
    pub sollicitant: Sollicitant,
    pub status: SollicitatieStatus,
    pub compliance_snapshot: ComplianceSnapshot,
    pub voorgesteld_tarief_cent: Option<u32>,
    pub team_grootte: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WerkuurStatus {
    Gepland,
    Gewerkt,
    Goedgekeurd,
}

/// A scheduled work-hour record materialized for an accepted assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Werkuur {
    pub id: WerkuurId,
    pub opdracht_id: OpdrachtId,
    pub zzp_user_id: UserId,
    pub datum: NaiveDate,
    pub start_tijd: NaiveTime,
    pub eind_tijd: NaiveTime,
    pub uurtarief_cent: u32,
    pub status: WerkuurStatus,
}

/// Payload for creating a posting.
#[derive(Debug, Clone, Deserialize)]
pub struct OpdrachtDraft {
    pub titel: String,
    pub beschrijving: String,
    pub locatie: String,
    pub start_datum: NaiveDate,
    pub eind_datum: NaiveDate,
    pub start_tijd: NaiveTime,
    pub eind_tijd: NaiveTime,
    pub uurtarief_cent: u32,
    pub aantal_beveiligers: u32,
    pub target_audience: TargetAudience,
    #[serde(default)]
    pub direct_zzp_allowed: bool,
    #[serde(default)]
    pub auto_accept: bool,
    #[serde(default)]
    pub min_team_grootte: Option<u32>,
    /// Urgent postings surface first and unlock the auto-accept fill path.
    #[serde(default)]
    pub urgent: bool,
    /// `false` keeps the posting as a draft, invisible to applicants.
    #[serde(default = "default_publiceer")]
    pub publiceer: bool,
    #[serde(default)]
    pub team_leden: Vec<UserId>,
}

fn default_publiceer() -> bool {
    true
}

/// Payload for applying to a posting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SollicitatiePayload {
    #[serde(default)]
    pub motivatie: Option<String>,
    #[serde(default)]
    pub voorgesteld_tarief_cent: Option<u32>,
    #[serde(default)]
    pub team_grootte: Option<u32>,
}

/// Reviewer decision on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Besluit {
    Accepteren,
    Afwijzen,
}

/// Listing view selector; `Available` applies the compliance gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpdrachtView {
    Available,
    #[default]
    Eigen,
}

/// Filters and pagination for posting listings.
#[derive(Debug, Clone, Default)]
pub struct OpdrachtFilter {
    pub view: OpdrachtView,
    pub status: Option<OpdrachtStatus>,
    pub locatie: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}
