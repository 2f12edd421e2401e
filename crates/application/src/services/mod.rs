//! Application services

mod assistant_service;
mod auth_service;
mod branding_service;
pub mod dashboard_service;
mod registry_service;

pub use assistant_service::AssistantService;
pub use auth_service::AdminAuthService;
pub use branding_service::{BrandingService, DEFAULT_LOGO};
pub use dashboard_service::{DashboardStats, GrowthPoint};
pub use registry_service::ApplicantRegistry;
