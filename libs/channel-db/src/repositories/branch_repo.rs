use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::listing::{self, Page, Query};
use crate::models::branch::{Branch, BranchFilter, BranchPatch, NewBranch};
use crate::store::{Record, Store};
use crate::utils::Clock;

#[derive(Clone, Debug)]
pub struct BranchRepository {
    store: Arc<dyn Store<Branch>>,
    clock: Arc<dyn Clock>,
}

impl BranchRepository {
    pub fn new(store: Arc<dyn Store<Branch>>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn list(
        &self,
        query: &Query<BranchFilter>,
        page: i64,
        limit: i64,
    ) -> Result<Page<Branch>> {
        let snapshot = self.store.snapshot().await?;
        Ok(listing::list(snapshot, query, page, limit, self.clock.now()))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Branch> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| StoreError::not_found(Branch::ENTITY, id))
    }

    pub async fn create(&self, input: NewBranch) -> Result<Branch> {
        let now = self.clock.now();
        let mut branch = Branch {
            id: String::new(),
            branch_name: input.branch_name,
            branch_code: input.branch_code,
            reference_type: input.reference_type,
            reference_id: input.reference_id,
            reference_name: input.reference_name,
            address: input.address,
            city: input.city,
            district: input.district,
            contact_number: input.contact_number,
            email: input.email,
            status: input.status,
            created_at: now,
            updated_at: now,
        };
        branch.validate()?;

        let created = self.store.insert(branch).await?;
        info!(id = %created.id, code = %created.branch_code, "branch created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: BranchPatch) -> Result<Branch> {
        let now = self.clock.now();
        let updated = self
            .store
            .modify(
                id,
                Box::new(move |branch: &mut Branch| {
                    patch.apply(branch);
                    branch.validate()?;
                    branch.updated_at = now.max(branch.created_at);
                    Ok(())
                }),
            )
            .await?;
        debug!(id, "branch updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<Branch> {
        let removed = self.store.remove(id).await?;
        info!(id, code = %removed.branch_code, "branch deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityStatus;
    use crate::models::branch::ReferenceType;
    use crate::store::InMemoryStore;
    use crate::utils::FixedClock;
    use chrono::{TimeZone, Utc};

    fn new_branch(name: &str, code: &str, city: &str, reference_type: ReferenceType) -> NewBranch {
        NewBranch {
            branch_name: name.to_string(),
            branch_code: code.to_string(),
            reference_type,
            reference_id: "H001".to_string(),
            reference_name: "Colombo General Hospital".to_string(),
            address: String::new(),
            city: city.to_string(),
            district: city.to_string(),
            contact_number: String::new(),
            email: String::new(),
            status: ActivityStatus::Active,
        }
    }

    fn repo() -> BranchRepository {
        BranchRepository::new(
            Arc::new(InMemoryStore::<Branch>::new("b")),
            Arc::new(FixedClock::new(
                Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            )),
        )
    }

    #[tokio::test]
    async fn filters_by_reference_type_and_city_text() {
        let repo = repo();
        repo.create(new_branch("Colombo Main", "CMB001", "Colombo", ReferenceType::Hospital))
            .await
            .unwrap();
        repo.create(new_branch("Galle Agent Office", "GAL001", "Galle", ReferenceType::Agent))
            .await
            .unwrap();

        let agents_only = Query {
            fields: BranchFilter {
                reference_type: Some(ReferenceType::Agent),
                ..BranchFilter::default()
            },
            ..Query::default()
        };
        let page = repo.list(&agents_only, 1, 10).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].branch_code, "GAL001");

        let page = repo.list(&Query::text("colombo"), 1, 10).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].branch_code, "CMB001");
    }

    #[tokio::test]
    async fn update_cannot_blank_required_fields() {
        let repo = repo();
        let branch = repo
            .create(new_branch("Kandy", "KDY001", "Kandy", ReferenceType::Hospital))
            .await
            .unwrap();

        let patch = BranchPatch {
            branch_code: Some("   ".to_string()),
            ..BranchPatch::default()
        };
        assert!(matches!(
            repo.update(&branch.id, patch).await,
            Err(StoreError::Validation(_))
        ));
        assert_eq!(repo.get_by_id(&branch.id).await.unwrap().branch_code, "KDY001");
    }

    #[tokio::test]
    async fn missing_branch_is_not_found() {
        let err = repo().get_by_id("b9").await.unwrap_err();
        assert_eq!(err.to_string(), "Branch not found");
    }
}
