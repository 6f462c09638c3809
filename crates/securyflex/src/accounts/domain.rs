use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for platform users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Role fixed at onboarding; never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    ZzpBeveiliger,
    Bedrijf,
    Opdrachtgever,
    Admin,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            UserRole::ZzpBeveiliger => "zzp_beveiliger",
            UserRole::Bedrijf => "bedrijf",
            UserRole::Opdrachtgever => "opdrachtgever",
            UserRole::Admin => "admin",
        }
    }
}

/// Identity record; soft-deactivated via `actief`, never hard-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
    pub actief: bool,
}

/// Status of a government-issued ND-nummer security license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NdNummerStatus {
    NietGeregistreerd,
    Actief,
    Verlopen,
    Geschorst,
    Ingetrokken,
}

impl NdNummerStatus {
    pub const fn label(self) -> &'static str {
        match self {
            NdNummerStatus::NietGeregistreerd => "NIET_GEREGISTREERD",
            NdNummerStatus::Actief => "ACTIEF",
            NdNummerStatus::Verlopen => "VERLOPEN",
            NdNummerStatus::Geschorst => "GESCHORST",
            NdNummerStatus::Ingetrokken => "INGETROKKEN",
        }
    }
}

/// Profile extension for a freelance security guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZzpProfile {
    pub user_id: UserId,
    pub naam: String,
    pub nd_nummer: Option<String>,
    pub nd_nummer_status: NdNummerStatus,
    pub nd_nummer_verval_datum: Option<NaiveDate>,
}

/// Roster entry on a Bedrijf profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLid {
    pub user_id: UserId,
    pub naam: String,
    pub actief: bool,
}

/// Profile extension for a security staffing company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedrijfProfile {
    pub user_id: UserId,
    pub bedrijfsnaam: String,
    pub kvk_nummer: String,
    pub nd_nummer: Option<String>,
    pub nd_nummer_status: NdNummerStatus,
    pub nd_nummer_verval_datum: Option<NaiveDate>,
    pub team_leden: Vec<TeamLid>,
}

impl BedrijfProfile {
    /// Roster members that may be pre-assigned onto a posting.
    pub fn actieve_team_leden(&self) -> impl Iterator<Item = &TeamLid> {
        self.team_leden.iter().filter(|lid| lid.actief)
    }
}

/// Profile extension for a commissioning client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpdrachtgeverProfile {
    pub user_id: UserId,
    pub organisatie: String,
}

/// The single applicant-capable profile a user can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicantProfiel {
    Zzp(ZzpProfile),
    Bedrijf(BedrijfProfile),
}

impl ApplicantProfiel {
    pub fn user_id(&self) -> &UserId {
        match self {
            ApplicantProfiel::Zzp(profiel) => &profiel.user_id,
            ApplicantProfiel::Bedrijf(profiel) => &profiel.user_id,
        }
    }

    /// License status and expiry, jointly authoritative for compliance.
    pub fn licentie(&self) -> (NdNummerStatus, Option<NaiveDate>) {
        match self {
            ApplicantProfiel::Zzp(profiel) => {
                (profiel.nd_nummer_status, profiel.nd_nummer_verval_datum)
            }
            ApplicantProfiel::Bedrijf(profiel) => {
                (profiel.nd_nummer_status, profiel.nd_nummer_verval_datum)
            }
        }
    }

    pub fn is_bedrijf(&self) -> bool {
        matches!(self, ApplicantProfiel::Bedrijf(_))
    }
}

/// Flattened license view used by the compliance sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicentieProfiel {
    pub user_id: UserId,
    pub naam: String,
    pub nd_nummer_status: NdNummerStatus,
    pub nd_nummer_verval_datum: Option<NaiveDate>,
}
