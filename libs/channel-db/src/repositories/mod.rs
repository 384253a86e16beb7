pub mod agent_repo;
pub mod audit_log_repo;
pub mod branch_repo;
pub mod discount_repo;

pub use agent_repo::AgentRepository;
pub use audit_log_repo::AuditLogRepository;
pub use branch_repo::BranchRepository;
pub use discount_repo::DiscountRepository;
