use super::domain::{
    ApplicantProfiel, BedrijfProfile, LicentieProfiel, NdNummerStatus, OpdrachtgeverProfile, User,
    UserId,
};
use crate::notifications::domain::LifecycleEvent;
use crate::store::StoreError;

/// Storage abstraction over users and their role profiles.
///
/// Mutating calls accept the lifecycle events they produce so adapters can
/// record event and mutation together; the fan-out worker delivers them
/// afterwards.
pub trait AccountStore: Send + Sync {
    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// The user's single applicant-capable profile, if any.
    fn applicant_profiel(&self, id: &UserId) -> Result<Option<ApplicantProfiel>, StoreError>;

    fn bedrijf_profiel(&self, id: &UserId) -> Result<Option<BedrijfProfile>, StoreError>;

    fn opdrachtgever_profiel(&self, id: &UserId)
        -> Result<Option<OpdrachtgeverProfile>, StoreError>;

    /// Every profile carrying a registered ND-nummer, for the sweep.
    fn licentie_profielen(&self) -> Result<Vec<LicentieProfiel>, StoreError>;

    fn update_nd_nummer_status(
        &self,
        id: &UserId,
        naar: NdNummerStatus,
        events: Vec<LifecycleEvent>,
    ) -> Result<(), StoreError>;
}
