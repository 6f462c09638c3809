use super::domain::{
    Opdracht, OpdrachtId, OpdrachtStatus, Sollicitatie, SollicitatieId, Werkuur,
};
use crate::accounts::UserId;
use crate::notifications::domain::LifecycleEvent;
use crate::store::StoreError;

/// Extra state an accept applies inside the store's transaction, decided by
/// the service up front. Keeping the capacity comparison and these writes in
/// one critical section closes the read-then-accept race: two simultaneous
/// accepts on the last slot cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct AcceptDirective {
    /// Bedrijf applicant: assign the whole posting to this company and mark
    /// it `Toegewezen` regardless of the headcount.
    pub set_accepted_bedrijf: Option<UserId>,
    /// Applied when this accept fills the final slot.
    pub bij_volledig: Option<BijVolledig>,
    /// Events recorded with the accept itself.
    pub events: Vec<LifecycleEvent>,
    /// Events recorded only when the posting ends up `Toegewezen`.
    pub events_bij_toewijzing: Vec<LifecycleEvent>,
}

/// Follow-up writes for an accept that fills the posting.
#[derive(Debug, Clone)]
pub struct BijVolledig {
    pub markeer_toegewezen: bool,
    /// Scheduled work-hour record to materialize, pre-built by the service.
    pub werkuur: Option<Werkuur>,
}

/// Result of a capacity-guarded accept.
#[derive(Debug, Clone)]
pub struct AcceptResult {
    pub sollicitatie: Sollicitatie,
    pub opdracht: Opdracht,
    pub werkuur: Option<Werkuur>,
}

/// Storage abstraction over postings, applications, and work hours.
///
/// Mutating methods take the lifecycle events they produce; adapters record
/// event and mutation in the same transaction so the fan-out worker can
/// deliver them afterwards without ever observing a half-committed change.
pub trait MarketplaceStore: Send + Sync {
    fn insert_opdracht(
        &self,
        opdracht: Opdracht,
        events: Vec<LifecycleEvent>,
    ) -> Result<Opdracht, StoreError>;

    fn fetch_opdracht(&self, id: &OpdrachtId) -> Result<Option<Opdracht>, StoreError>;

    fn list_opdrachten(&self) -> Result<Vec<Opdracht>, StoreError>;

    /// Apply a status change; transition validity is the service's job.
    fn update_opdracht_status(
        &self,
        id: &OpdrachtId,
        naar: OpdrachtStatus,
        events: Vec<LifecycleEvent>,
    ) -> Result<Opdracht, StoreError>;

    /// Fails with `Conflict` when the (opdracht, sollicitant) pair already
    /// has an application.
    fn insert_sollicitatie(
        &self,
        sollicitatie: Sollicitatie,
        events: Vec<LifecycleEvent>,
    ) -> Result<Sollicitatie, StoreError>;

    fn fetch_sollicitatie(&self, id: &SollicitatieId) -> Result<Option<Sollicitatie>, StoreError>;

    fn sollicitaties_voor_opdracht(
        &self,
        id: &OpdrachtId,
    ) -> Result<Vec<Sollicitatie>, StoreError>;

    /// Atomic conditional accept: flips a `Pending` application to
    /// `Accepted` only while the accepted count is below the posting's
    /// headcount, then applies the directive. Fails with `Conflict` when
    /// the application is not pending or the capacity is already reached.
    fn accept_sollicitatie(
        &self,
        id: &SollicitatieId,
        directive: AcceptDirective,
    ) -> Result<AcceptResult, StoreError>;

    /// Pure status flip to `Rejected`; fails with `Conflict` when the
    /// application is not pending.
    fn reject_sollicitatie(
        &self,
        id: &SollicitatieId,
        events: Vec<LifecycleEvent>,
    ) -> Result<Sollicitatie, StoreError>;

    fn werkuren_voor_opdracht(&self, id: &OpdrachtId) -> Result<Vec<Werkuur>, StoreError>;
}
