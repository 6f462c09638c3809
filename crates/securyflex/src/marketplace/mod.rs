//! Opdracht/sollicitatie lifecycle: compliance gating, audience rules,
//! capacity-guarded accepts, and the posting state machine.

pub mod compliance;
pub mod domain;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use compliance::{
    beoordeel, ComplianceError, ComplianceReport, ComplianceSnapshot, ComplianceWarning,
    RiskLevel, COMPLIANCE_ACTION_URL,
};
pub use domain::{
    Besluit, Opdracht, OpdrachtCreator, OpdrachtDraft, OpdrachtFilter, OpdrachtId, OpdrachtStatus,
    OpdrachtView, Sollicitant, Sollicitatie, SollicitatieId, SollicitatiePayload,
    SollicitatieStatus, TargetAudience, Werkuur, WerkuurId, WerkuurStatus,
};
pub use router::{marketplace_router, MarketplaceRouterState};
pub use service::{
    ApplyOutcome, BedrijfDashboardStats, DecideOutcome, MarketplaceError, MarketplaceService,
    OpdrachtenPagina,
};
pub use store::{AcceptDirective, AcceptResult, BijVolledig, MarketplaceStore};
