pub mod seed;

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::models::agent::Agent;
use crate::models::audit_log::AuditLog;
use crate::models::branch::Branch;
use crate::models::discount::Discount;
use crate::repositories::{
    AgentRepository, AuditLogRepository, BranchRepository, DiscountRepository,
};
use crate::store::InMemoryStore;
use crate::utils::Clock;

/// Every repository the panel needs, sharing one clock.
#[derive(Clone, Debug)]
pub struct Repositories {
    pub discounts: DiscountRepository,
    pub audit_logs: AuditLogRepository,
    pub agents: AgentRepository,
    pub branches: BranchRepository,
}

impl Repositories {
    /// Empty in-memory stores.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self {
            discounts: DiscountRepository::new(
                Arc::new(InMemoryStore::<Discount>::new("d")),
                clock.clone(),
            ),
            audit_logs: AuditLogRepository::new(
                Arc::new(InMemoryStore::<AuditLog>::new("l")),
                clock.clone(),
            ),
            agents: AgentRepository::new(Arc::new(InMemoryStore::<Agent>::new("a")), clock.clone()),
            branches: BranchRepository::new(Arc::new(InMemoryStore::<Branch>::new("b")), clock),
        }
    }

    /// In-memory stores pre-filled with the demo data set.
    pub fn demo(clock: Arc<dyn Clock>) -> Result<Self> {
        let discounts = seed::discounts()?;
        let audit_logs = seed::audit_logs()?;
        let agents = seed::agents()?;
        let branches = seed::branches()?;

        info!(
            discounts = discounts.len(),
            audit_logs = audit_logs.len(),
            agents = agents.len(),
            branches = branches.len(),
            "seeding demo data"
        );

        Ok(Self {
            discounts: DiscountRepository::new(
                Arc::new(InMemoryStore::<Discount>::seeded("d", discounts)),
                clock.clone(),
            ),
            audit_logs: AuditLogRepository::new(
                Arc::new(InMemoryStore::<AuditLog>::seeded("l", audit_logs)),
                clock.clone(),
            ),
            agents: AgentRepository::new(
                Arc::new(InMemoryStore::<Agent>::seeded("a", agents)),
                clock.clone(),
            ),
            branches: BranchRepository::new(
                Arc::new(InMemoryStore::<Branch>::seeded("b", branches)),
                clock,
            ),
        })
    }
}
