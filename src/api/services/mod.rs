pub mod health;
pub mod pages;
pub mod track;
pub mod visits;
pub mod webhook;

pub use health::{AppStartTime, HealthService, health_routes};
pub use pages::{PagesService, pages_routes};
pub use track::{TrackService, track_routes};
pub use visits::{VisitsService, visits_routes};
pub use webhook::{WebhookService, webhook_routes};
