pub mod agent;
pub mod audit_log;
pub mod branch;
pub mod discount;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Persisted on/off state for agents and branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[default]
    Active,
    Inactive,
}

impl FromStr for ActivityStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(StoreError::validation(format!("Unknown status: {other}"))),
        }
    }
}
