use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::listing::{self, Page, Query};
use crate::models::audit_log::{AuditLog, AuditLogFilter, NewAuditEntry};
use crate::store::{Record, Store};
use crate::utils::Clock;

/// Append-only access to the audit trail.
#[derive(Clone, Debug)]
pub struct AuditLogRepository {
    store: Arc<dyn Store<AuditLog>>,
    clock: Arc<dyn Clock>,
}

impl AuditLogRepository {
    pub fn new(store: Arc<dyn Store<AuditLog>>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn list(
        &self,
        query: &Query<AuditLogFilter>,
        page: i64,
        limit: i64,
    ) -> Result<Page<AuditLog>> {
        let snapshot = self.store.snapshot().await?;
        Ok(listing::list(snapshot, query, page, limit, self.clock.now()))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<AuditLog> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| StoreError::not_found(AuditLog::ENTITY, id))
    }

    /// Appends an entry stamped with the current time.
    pub async fn record(&self, entry: NewAuditEntry) -> Result<AuditLog> {
        let log = AuditLog {
            id: String::new(),
            action: entry.action,
            user: entry.user,
            user_id: entry.user_id,
            user_role: entry.user_role,
            timestamp: self.clock.now(),
            details: entry.details,
            module: entry.module,
            ip_address: entry.ip_address,
            status: entry.status,
        };
        let saved = self.store.insert(log).await?;
        debug!(id = %saved.id, action = %saved.action, module = %saved.module, "audit entry recorded");
        Ok(saved)
    }
}
