pub mod account;
pub mod page;
pub mod view_tracking;
pub mod visit;

pub use account::Entity as AccountEntity;
pub use page::Entity as PageEntity;
pub use view_tracking::Entity as ViewTrackingEntity;
pub use visit::Entity as VisitEntity;
