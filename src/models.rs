pub mod billing;
pub mod crm;
pub mod dashboard;
pub mod inventory;
pub mod resources;
pub mod sessions;
pub mod subscriptions;
