//! Users, role profiles, and the ND-nummer license data they carry.

pub mod domain;
pub mod session;
pub mod store;

pub use domain::{
    ApplicantProfiel, BedrijfProfile, LicentieProfiel, NdNummerStatus, OpdrachtgeverProfile,
    TeamLid, User, UserId, UserRole, ZzpProfile,
};
pub use session::{bearer_token, SessionStore};
pub use store::AccountStore;
