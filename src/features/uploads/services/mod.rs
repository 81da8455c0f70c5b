pub mod audit_log;
pub mod intake_service;

pub use audit_log::AuditLog;
pub use intake_service::IntakeService;
