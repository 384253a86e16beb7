use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::listing::{FieldFilter, Listable, contains_ignore_case};
use crate::store::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditOutcome {
    Success,
    Failed,
}

impl FromStr for AuditOutcome {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            other => Err(StoreError::validation(format!(
                "Unknown audit status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub action: String,
    pub user: String,
    pub user_id: String,
    pub user_role: String,
    pub timestamp: DateTime<Utc>,
    pub details: String,
    pub module: String,
    pub ip_address: String,
    pub status: AuditOutcome,
}

impl Record for AuditLog {
    const ENTITY: &'static str = "Audit log";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Listable for AuditLog {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.action.as_str(), self.user.as_str()]
    }

    fn raw_search_fields(&self) -> Vec<&str> {
        vec![self.ip_address.as_str()]
    }
}

/// An entry to append. The store assigns the id, the repository the timestamp.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub action: String,
    pub user: String,
    pub user_id: String,
    pub user_role: String,
    pub details: String,
    pub module: String,
    pub ip_address: String,
    pub status: AuditOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    /// Exact module name ("Discounts", "Authentication", ...).
    pub module: Option<String>,
    pub status: Option<AuditOutcome>,
    /// Case-insensitive substring of the acting user's name.
    pub user: Option<String>,
    /// Case-insensitive substring of the action.
    pub action: Option<String>,
}

impl FieldFilter<AuditLog> for AuditLogFilter {
    fn matches(&self, log: &AuditLog) -> bool {
        self.module.as_deref().is_none_or(|m| log.module == m)
            && self.status.is_none_or(|s| log.status == s)
            && self
                .user
                .as_deref()
                .is_none_or(|u| contains_ignore_case(&log.user, u))
            && self
                .action
                .as_deref()
                .is_none_or(|a| contains_ignore_case(&log.action, a))
    }
}
