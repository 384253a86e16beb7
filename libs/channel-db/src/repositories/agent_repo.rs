use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::listing::{self, Page, Query};
use crate::models::agent::{Agent, AgentFilter, AgentPatch, NewAgent};
use crate::store::{Record, Store};
use crate::utils::Clock;

#[derive(Clone, Debug)]
pub struct AgentRepository {
    store: Arc<dyn Store<Agent>>,
    clock: Arc<dyn Clock>,
}

impl AgentRepository {
    pub fn new(store: Arc<dyn Store<Agent>>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn list(
        &self,
        query: &Query<AgentFilter>,
        page: i64,
        limit: i64,
    ) -> Result<Page<Agent>> {
        let snapshot = self.store.snapshot().await?;
        Ok(listing::list(snapshot, query, page, limit, self.clock.now()))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Agent> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| StoreError::not_found(Agent::ENTITY, id))
    }

    pub async fn create(&self, input: NewAgent) -> Result<Agent> {
        let now = self.clock.now();
        let mut agent = Agent {
            id: String::new(),
            agent_name: input.agent_name,
            agent_code: input.agent_code,
            company_name: input.company_name,
            address: input.address,
            city: input.city,
            district: input.district,
            contact_number: input.contact_number,
            email: input.email,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        agent.validate()?;

        let created = self.store.insert(agent).await?;
        info!(id = %created.id, code = %created.agent_code, "agent created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: AgentPatch) -> Result<Agent> {
        let now = self.clock.now();
        let updated = self
            .store
            .modify(
                id,
                Box::new(move |agent: &mut Agent| {
                    patch.apply(agent);
                    agent.validate()?;
                    agent.updated_at = now.max(agent.created_at);
                    Ok(())
                }),
            )
            .await?;
        debug!(id, "agent updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<Agent> {
        let removed = self.store.remove(id).await?;
        info!(id, code = %removed.agent_code, "agent deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityStatus;
    use crate::store::InMemoryStore;
    use crate::utils::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    fn new_agent(name: &str, code: &str, phone: Option<&str>) -> NewAgent {
        NewAgent {
            agent_name: name.to_string(),
            agent_code: code.to_string(),
            company_name: None,
            address: None,
            city: Some("Galle".to_string()),
            district: None,
            contact_number: phone.map(str::to_string),
            email: None,
            status: None,
        }
    }

    fn setup() -> (AgentRepository, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap(),
        ));
        let store = Arc::new(InMemoryStore::<Agent>::new("a"));
        (AgentRepository::new(store, clock.clone()), clock)
    }

    #[tokio::test]
    async fn create_defaults_to_active_and_requires_name_and_code() {
        let (repo, _) = setup();
        let agent = repo
            .create(new_agent("Southern Medical", "AGT-SOUTH-001", None))
            .await
            .unwrap();
        assert_eq!(agent.status, ActivityStatus::Active);
        assert_eq!(agent.id, "a1");

        let err = repo.create(new_agent("", "AGT-X", None)).await.unwrap_err();
        assert_eq!(err, StoreError::validation("agentName is required"));
    }

    #[tokio::test]
    async fn search_matches_phone_without_case_folding() {
        let (repo, clock) = setup();
        repo.create(new_agent("Southern Medical", "AGT-SOUTH-001", Some("+94912234567")))
            .await
            .unwrap();
        clock.advance(Duration::hours(1));
        repo.create(new_agent("Northern Health", "AGT-NORTH-001", Some("+94124567890")))
            .await
            .unwrap();

        let page = repo.list(&Query::text("+9412"), 1, 10).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].agent_code, "AGT-NORTH-001");

        let page = repo.list(&Query::text("agt-"), 1, 10).await.unwrap();
        let codes: Vec<_> = page.items.iter().map(|a| a.agent_code.as_str()).collect();
        assert_eq!(codes, ["AGT-NORTH-001", "AGT-SOUTH-001"]);
    }

    #[tokio::test]
    async fn update_patches_and_status_filter_applies() {
        let (repo, clock) = setup();
        let agent = repo
            .create(new_agent("Southern Medical", "AGT-SOUTH-001", None))
            .await
            .unwrap();

        clock.advance(Duration::days(1));
        let patch = AgentPatch {
            status: Some(ActivityStatus::Inactive),
            email: Some("contact@southern-med.lk".to_string()),
            ..AgentPatch::default()
        };
        let updated = repo.update(&agent.id, patch).await.unwrap();
        assert_eq!(updated.status, ActivityStatus::Inactive);
        assert_eq!(updated.city.as_deref(), Some("Galle"));
        assert!(updated.updated_at > updated.created_at);

        let inactive = Query {
            fields: AgentFilter {
                status: Some(ActivityStatus::Inactive),
            },
            ..Query::default()
        };
        assert_eq!(repo.list(&inactive, 1, 10).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let (repo, _) = setup();
        let agent = repo
            .create(new_agent("Temp", "AGT-TMP", None))
            .await
            .unwrap();
        repo.delete(&agent.id).await.unwrap();
        assert!(matches!(
            repo.delete(&agent.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
