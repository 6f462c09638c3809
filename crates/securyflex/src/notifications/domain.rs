use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::{NdNummerStatus, UserId};
use crate::marketplace::compliance::RiskLevel;
use crate::marketplace::domain::{OpdrachtId, SollicitatieId};
use crate::payments::domain::BetalingStatus;

/// Identifier wrapper for notification rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificatieCategorie {
    Sollicitatie,
    Opdracht,
    Compliance,
    Betaling,
}

impl NotificatieCategorie {
    pub const fn label(self) -> &'static str {
        match self {
            NotificatieCategorie::Sollicitatie => "sollicitatie",
            NotificatieCategorie::Opdracht => "opdracht",
            NotificatieCategorie::Compliance => "compliance",
            NotificatieCategorie::Betaling => "betaling",
        }
    }
}

/// Priority drives which external channels the dispatcher reaches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificatiePrioriteit {
    Laag,
    Normaal,
    Hoog,
    Urgent,
}

/// User-facing message record; mutated only to toggle the read flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub categorie: NotificatieCategorie,
    pub prioriteit: NotificatiePrioriteit,
    pub titel: String,
    pub bericht: String,
    /// Stable key for de-duplication, e.g. `nd_warning_30:user-7`.
    pub event_key: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Append-only observation of a license status change or compliance event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdNummerAuditEntry {
    pub user_id: UserId,
    pub vorige_status: Option<NdNummerStatus>,
    pub nieuwe_status: NdNummerStatus,
    pub risk_level: RiskLevel,
    pub omschrijving: String,
    pub geregistreerd_op: DateTime<Utc>,
}

/// Expiry-warning tier emitted by the compliance sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningTier {
    Dagen90,
    Dagen60,
    Dagen30,
}

impl WarningTier {
    /// The tier that applies for a remaining-days count, if any.
    pub fn voor_dagen(dagen: i64) -> Option<Self> {
        match dagen {
            0..=30 => Some(WarningTier::Dagen30),
            31..=60 => Some(WarningTier::Dagen60),
            61..=90 => Some(WarningTier::Dagen90),
            _ => None,
        }
    }

    pub const fn dagen(self) -> i64 {
        match self {
            WarningTier::Dagen90 => 90,
            WarningTier::Dagen60 => 60,
            WarningTier::Dagen30 => 30,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WarningTier::Dagen90 => "nd_warning_90",
            WarningTier::Dagen60 => "nd_warning_60",
            WarningTier::Dagen30 => "nd_warning_30",
        }
    }
}

/// Everything the fan-out needs to deliver a state transition: who acted,
/// what changed, and who should hear about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "soort", rename_all = "snake_case")]
pub enum LifecycleEvent {
    SollicitatieCreated {
        opdracht_id: OpdrachtId,
        sollicitatie_id: SollicitatieId,
        sollicitant: UserId,
        eigenaar: UserId,
        opdracht_titel: String,
    },
    SollicitatieAccepted {
        opdracht_id: OpdrachtId,
        sollicitatie_id: SollicitatieId,
        sollicitant: UserId,
        opdracht_titel: String,
    },
    SollicitatieRejected {
        opdracht_id: OpdrachtId,
        sollicitatie_id: SollicitatieId,
        sollicitant: UserId,
        opdracht_titel: String,
    },
    OpdrachtToegewezen {
        opdracht_id: OpdrachtId,
        eigenaar: UserId,
        opdracht_titel: String,
    },
    NdNummerStatusChanged {
        user_id: UserId,
        naam: String,
        van: Option<NdNummerStatus>,
        naar: NdNummerStatus,
        risk_level: RiskLevel,
    },
    NdNummerExpiryWarning {
        user_id: UserId,
        naam: String,
        tier: WarningTier,
        dagen_resterend: i64,
        verval_datum: NaiveDate,
    },
    PaymentStatusChanged {
        ontvanger: UserId,
        externe_betaling_id: String,
        status: BetalingStatus,
    },
}

impl LifecycleEvent {
    /// License-related events require an audit entry before anything else.
    pub const fn raakt_licentie(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::NdNummerStatusChanged { .. }
                | LifecycleEvent::NdNummerExpiryWarning { .. }
        )
    }
}
