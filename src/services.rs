pub mod billing_service;
pub mod crm_service;
pub mod dashboard_service;
pub mod inventory_service;
pub mod payment_service;
pub mod resource_service;
pub mod session_service;

pub use billing_service::BillingService;
pub use crm_service::CrmService;
pub use dashboard_service::DashboardService;
pub use inventory_service::InventoryService;
pub use payment_service::PaymentService;
pub use resource_service::ResourceService;
pub use session_service::SessionService;

#[cfg(test)]
pub mod test_support;
