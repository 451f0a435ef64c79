pub mod billing;
pub mod quota;
pub mod tracking;
pub mod visits;

pub use billing::{BillingService, PaymentWebhookEvent, PlanChange};
pub use quota::{OwnerResolver, PlanCapabilities, QuotaGate, RenderMode};
pub use tracking::{CountOutcome, ViewTracker, visitor_identity_hash};
pub use visits::build_visit_record;
