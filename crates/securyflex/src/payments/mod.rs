//! Mirror of Finqle payment/invoice state, driven by inbound webhooks.

pub mod domain;
pub mod router;
pub mod store;
pub mod webhook;


pub use domain::{
    Betaling, BetalingStatus, Factuur, FactuurId, FactuurStatus, WebhookEnvelope,
};
pub use router::{webhook_router, WebhookRouterState, SIGNATURE_HEADER};
pub use store::PaymentStore;
pub use webhook::{sign_body, verify_signature, PaymentService, Verwerking, WebhookError};
