use channel_db::models::audit_log::{AuditOutcome, NewAuditEntry};
use channel_db::repositories::AuditLogRepository;
use tracing::warn;

use crate::config::AdminConfig;

/// Who an audit entry is attributed to.
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub user_id: String,
    pub role: String,
}

impl Actor {
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            user_id: "N/A".to_string(),
            role: "N/A".to_string(),
        }
    }
}

impl From<&AdminConfig> for Actor {
    fn from(admin: &AdminConfig) -> Self {
        Self {
            name: admin.name.clone(),
            user_id: admin.user_id.clone(),
            role: admin.role.clone(),
        }
    }
}

/// Appends audit entries for panel activity. A failed append is logged and
/// never fails the request that triggered it.
#[derive(Debug, Clone)]
pub struct ActivityService {
    audit_logs: AuditLogRepository,
    admin: Actor,
}

impl ActivityService {
    pub fn new(audit_logs: AuditLogRepository, admin: Actor) -> Self {
        Self { audit_logs, admin }
    }

    /// Successful change made by the panel admin.
    pub async fn log(&self, module: &str, action: &str, details: String, ip: &str) {
        self.record(&self.admin, module, action, details, ip, AuditOutcome::Success)
            .await;
    }

    pub async fn log_login(&self, ok: bool, username: &str, ip: &str) {
        if ok {
            self.record(
                &self.admin,
                "Authentication",
                "User Login",
                "User logged in successfully".to_string(),
                ip,
                AuditOutcome::Success,
            )
            .await;
        } else {
            self.record(
                &Actor::unknown(),
                "Authentication",
                "Failed Login Attempt",
                format!("Failed login attempt with username: {username}"),
                ip,
                AuditOutcome::Failed,
            )
            .await;
        }
    }

    async fn record(
        &self,
        actor: &Actor,
        module: &str,
        action: &str,
        details: String,
        ip: &str,
        status: AuditOutcome,
    ) {
        let entry = NewAuditEntry {
            action: action.to_string(),
            user: actor.name.clone(),
            user_id: actor.user_id.clone(),
            user_role: actor.role.clone(),
            details,
            module: module.to_string(),
            ip_address: ip.to_string(),
            status,
        };
        if let Err(e) = self.audit_logs.record(entry).await {
            warn!("Failed to record audit entry '{}': {}", action, e);
        }
    }
}
