use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::accounts::NdNummerStatus;

/// Days before expiry at which a license starts counting as "expiring soon".
pub const WAARSCHUWING_VENSTER_DAGEN: i64 = 90;
/// Days before expiry at which the risk escalates to high.
pub const HOOG_RISICO_DAGEN: i64 = 30;

/// Remediation page every compliance block points the user at.
pub const COMPLIANCE_ACTION_URL: &str = "/dashboard/compliance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Deterministic classification of a license status and expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub status: NdNummerStatus,
    pub is_compliant: bool,
    pub is_expired: bool,
    pub is_expiring_soon: bool,
    pub days_until_expiry: Option<i64>,
    pub risk_level: RiskLevel,
}

/// Classify a license. Pure; no side effects, no I/O.
///
/// A missing expiry date always yields `Critical` with `days_until_expiry =
/// None`: unknown is never treated as compliant.
pub fn beoordeel(
    status: NdNummerStatus,
    verval_datum: Option<NaiveDate>,
    vandaag: NaiveDate,
) -> ComplianceReport {
    let days_until_expiry = verval_datum.map(|datum| (datum - vandaag).num_days());

    let is_expired = days_until_expiry.map(|dagen| dagen < 0).unwrap_or(false);
    let is_expiring_soon = days_until_expiry
        .map(|dagen| (0..=WAARSCHUWING_VENSTER_DAGEN).contains(&dagen))
        .unwrap_or(false);
    let is_compliant = status == NdNummerStatus::Actief
        && days_until_expiry.map(|dagen| dagen > 0).unwrap_or(false);

    let risk_level = if is_expired
        || verval_datum.is_none()
        || matches!(
            status,
            NdNummerStatus::Ingetrokken
                | NdNummerStatus::Geschorst
                | NdNummerStatus::NietGeregistreerd
        ) {
        RiskLevel::Critical
    } else {
        match days_until_expiry {
            Some(dagen) if dagen <= HOOG_RISICO_DAGEN => RiskLevel::High,
            Some(dagen) if dagen <= WAARSCHUWING_VENSTER_DAGEN => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    };

    ComplianceReport {
        status,
        is_compliant,
        is_expired,
        is_expiring_soon,
        days_until_expiry,
        risk_level,
    }
}

/// License state captured on a sollicitatie at application time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSnapshot {
    pub status: NdNummerStatus,
    pub risk_level: RiskLevel,
    pub days_until_expiry: Option<i64>,
    pub beoordeeld_op: NaiveDate,
}

impl ComplianceSnapshot {
    pub fn van_report(report: &ComplianceReport, vandaag: NaiveDate) -> Self {
        Self {
            status: report.status,
            risk_level: report.risk_level,
            days_until_expiry: report.days_until_expiry,
            beoordeeld_op: vandaag,
        }
    }
}

/// Marketplace participation blocked on license grounds. Distinct from a
/// generic forbidden error because it carries a remediation `action_url`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComplianceError {
    #[error("Uw ND-nummer is niet geregistreerd. Registreer uw ND-nummer om opdrachten te kunnen aannemen.")]
    NietGeregistreerd,
    #[error("Uw ND-nummer is verlopen. Vernieuw uw registratie bij Justis om weer te kunnen solliciteren.")]
    Verlopen,
    #[error("Uw ND-nummer is geschorst. Neem contact op met Justis voordat u verder kunt op het platform.")]
    Geschorst,
    #[error("Uw ND-nummer is ingetrokken. Solliciteren op opdrachten is niet mogelijk.")]
    Ingetrokken,
    #[error("De vervaldatum van uw ND-nummer ontbreekt of is niet dekkend. Controleer uw registratie.")]
    VervaldatumOngeldig,
}

impl ComplianceError {
    /// Map a non-compliant report onto the status-specific block.
    pub fn van_report(report: &ComplianceReport) -> Self {
        match report.status {
            NdNummerStatus::NietGeregistreerd => ComplianceError::NietGeregistreerd,
            NdNummerStatus::Verlopen => ComplianceError::Verlopen,
            NdNummerStatus::Geschorst => ComplianceError::Geschorst,
            NdNummerStatus::Ingetrokken => ComplianceError::Ingetrokken,
            NdNummerStatus::Actief => {
                if report.is_expired {
                    ComplianceError::Verlopen
                } else {
                    ComplianceError::VervaldatumOngeldig
                }
            }
        }
    }

    pub const fn action_url(&self) -> &'static str {
        COMPLIANCE_ACTION_URL
    }
}

/// Structured warning returned alongside an empty `available` listing when
/// the caller's license blocks participation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceWarning {
    pub status: NdNummerStatus,
    pub risk_level: RiskLevel,
    pub bericht: String,
    pub action_url: &'static str,
}

impl ComplianceWarning {
    pub fn van_report(report: &ComplianceReport) -> Self {
        let blokkade = ComplianceError::van_report(report);
        Self {
            status: report.status,
            risk_level: report.risk_level,
            bericht: blokkade.to_string(),
            action_url: blokkade.action_url(),
        }
    }
}
