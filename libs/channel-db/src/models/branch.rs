use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ActivityStatus;
use crate::error::{Result, StoreError};
use crate::listing::{FieldFilter, Listable};
use crate::store::Record;
use crate::utils::require_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    Hospital,
    Agent,
}

impl FromStr for ReferenceType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hospital" => Ok(Self::Hospital),
            "agent" => Ok(Self::Agent),
            other => Err(StoreError::validation(format!(
                "Unknown reference type: {other}"
            ))),
        }
    }
}

/// A physical branch, owned either by a hospital or by an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub branch_name: String,
    pub branch_code: String,
    pub reference_type: ReferenceType,
    pub reference_id: String,
    pub reference_name: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub contact_number: String,
    pub email: String,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Branch {
    pub(crate) fn validate(&mut self) -> Result<()> {
        self.branch_name = require_text("branchName", &self.branch_name)?;
        self.branch_code = require_text("branchCode", &self.branch_code)?;
        self.reference_id = require_text("referenceId", &self.reference_id)?;
        self.reference_name = require_text("referenceName", &self.reference_name)?;
        Ok(())
    }
}

impl Record for Branch {
    const ENTITY: &'static str = "Branch";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Listable for Branch {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.branch_name.as_str(),
            self.branch_code.as_str(),
            self.city.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBranch {
    pub branch_name: String,
    pub branch_code: String,
    pub reference_type: ReferenceType,
    pub reference_id: String,
    pub reference_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: ActivityStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPatch {
    pub branch_name: Option<String>,
    pub branch_code: Option<String>,
    pub reference_type: Option<ReferenceType>,
    pub reference_id: Option<String>,
    pub reference_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub status: Option<ActivityStatus>,
}

impl BranchPatch {
    pub(crate) fn apply(self, branch: &mut Branch) {
        if let Some(v) = self.branch_name {
            branch.branch_name = v;
        }
        if let Some(v) = self.branch_code {
            branch.branch_code = v;
        }
        if let Some(v) = self.reference_type {
            branch.reference_type = v;
        }
        if let Some(v) = self.reference_id {
            branch.reference_id = v;
        }
        if let Some(v) = self.reference_name {
            branch.reference_name = v;
        }
        if let Some(v) = self.address {
            branch.address = v;
        }
        if let Some(v) = self.city {
            branch.city = v;
        }
        if let Some(v) = self.district {
            branch.district = v;
        }
        if let Some(v) = self.contact_number {
            branch.contact_number = v;
        }
        if let Some(v) = self.email {
            branch.email = v;
        }
        if let Some(v) = self.status {
            branch.status = v;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BranchFilter {
    pub status: Option<ActivityStatus>,
    pub reference_type: Option<ReferenceType>,
}

impl FieldFilter<Branch> for BranchFilter {
    fn matches(&self, branch: &Branch) -> bool {
        self.status.is_none_or(|s| branch.status == s)
            && self.reference_type.is_none_or(|r| branch.reference_type == r)
    }
}
