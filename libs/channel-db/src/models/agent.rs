use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ActivityStatus;
use crate::error::Result;
use crate::listing::{FieldFilter, Listable};
use crate::store::Record;
use crate::utils::require_text;

/// A channelling agent (a company that books appointments on behalf of patients).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub agent_name: String,
    pub agent_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    pub(crate) fn validate(&mut self) -> Result<()> {
        self.agent_name = require_text("agentName", &self.agent_name)?;
        self.agent_code = require_text("agentCode", &self.agent_code)?;
        Ok(())
    }
}

impl Record for Agent {
    const ENTITY: &'static str = "Agent";

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

impl Listable for Agent {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.agent_name.as_str(),
            self.agent_code.as_str(),
            self.company_name.as_deref().unwrap_or_default(),
            self.city.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
        ]
    }

    fn raw_search_fields(&self) -> Vec<&str> {
        vec![self.contact_number.as_deref().unwrap_or_default()]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAgent {
    pub agent_name: String,
    pub agent_code: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPatch {
    pub agent_name: Option<String>,
    pub agent_code: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub status: Option<ActivityStatus>,
}

impl AgentPatch {
    pub(crate) fn apply(self, agent: &mut Agent) {
        if let Some(v) = self.agent_name {
            agent.agent_name = v;
        }
        if let Some(v) = self.agent_code {
            agent.agent_code = v;
        }
        if self.company_name.is_some() {
            agent.company_name = self.company_name;
        }
        if self.address.is_some() {
            agent.address = self.address;
        }
        if self.city.is_some() {
            agent.city = self.city;
        }
        if self.district.is_some() {
            agent.district = self.district;
        }
        if self.contact_number.is_some() {
            agent.contact_number = self.contact_number;
        }
        if self.email.is_some() {
            agent.email = self.email;
        }
        if let Some(status) = self.status {
            agent.status = status;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AgentFilter {
    pub status: Option<ActivityStatus>,
}

impl FieldFilter<Agent> for AgentFilter {
    fn matches(&self, agent: &Agent) -> bool {
        self.status.is_none_or(|s| agent.status == s)
    }
}
