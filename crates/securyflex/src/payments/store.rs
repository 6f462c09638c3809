use super::domain::{Betaling, Factuur, FactuurId, FactuurStatus};
use crate::notifications::domain::LifecycleEvent;
use crate::store::StoreError;

/// Storage abstraction over payments and invoices. Upserts key on the
/// external Finqle payment id so redelivered webhooks stay idempotent.
pub trait PaymentStore: Send + Sync {
    fn fetch_betaling(&self, externe_id: &str) -> Result<Option<Betaling>, StoreError>;

    fn upsert_betaling(
        &self,
        betaling: Betaling,
        events: Vec<LifecycleEvent>,
    ) -> Result<Betaling, StoreError>;

    fn fetch_factuur(&self, id: &FactuurId) -> Result<Option<Factuur>, StoreError>;

    fn insert_factuur(&self, factuur: Factuur) -> Result<Factuur, StoreError>;

    fn update_factuur_status(
        &self,
        id: &FactuurId,
        status: FactuurStatus,
        events: Vec<LifecycleEvent>,
    ) -> Result<Factuur, StoreError>;
}
