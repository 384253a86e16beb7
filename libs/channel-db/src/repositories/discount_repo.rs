use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::listing::{self, Page, Query};
use crate::models::discount::{
    Discount, DiscountFilter, DiscountPatch, DiscountStatus, NewDiscount,
};
use crate::store::{Record, Store};
use crate::utils::Clock;

#[derive(Clone, Debug)]
pub struct DiscountRepository {
    store: Arc<dyn Store<Discount>>,
    clock: Arc<dyn Clock>,
}

impl DiscountRepository {
    pub fn new(store: Arc<dyn Store<Discount>>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn list(
        &self,
        query: &Query<DiscountFilter>,
        page: i64,
        limit: i64,
    ) -> Result<Page<Discount>> {
        let snapshot = self.store.snapshot().await?;
        Ok(listing::list(snapshot, query, page, limit, self.clock.now()))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Discount> {
        let mut discount = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| StoreError::not_found(Discount::ENTITY, id))?;
        discount.refresh(self.clock.now());
        Ok(discount)
    }

    pub async fn create(&self, input: NewDiscount) -> Result<Discount> {
        let now = self.clock.now();
        let mut discount = Discount::from_new(input, now);
        discount.validate()?;

        let created = self.store.insert(discount).await?;
        info!(id = %created.id, code = %created.code, "discount created");
        Ok(created)
    }

    /// Merges `patch` over the stored discount and re-validates the result.
    pub async fn update(&self, id: &str, patch: DiscountPatch) -> Result<Discount> {
        let now = self.clock.now();
        let updated = self
            .store
            .modify(
                id,
                Box::new(move |discount: &mut Discount| {
                    patch.apply(discount);
                    discount.validate()?;
                    discount.updated_at = now.max(discount.created_at);
                    discount.refresh(now);
                    Ok(())
                }),
            )
            .await?;
        debug!(id, status = %updated.status, "discount updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<Discount> {
        let removed = self.store.remove(id).await?;
        info!(id, code = %removed.code, "discount deleted");
        Ok(removed)
    }

    /// Flips the enabled flag. Expired discounts cannot be switched either
    /// way and are left untouched.
    pub async fn toggle_enabled(&self, id: &str) -> Result<Discount> {
        let now = self.clock.now();
        let toggled = self
            .store
            .modify(
                id,
                Box::new(move |discount: &mut Discount| {
                    discount.refresh(now);
                    if discount.status == DiscountStatus::Expired {
                        return Err(StoreError::InvalidStateTransition {
                            entity: Discount::ENTITY,
                            id: discount.id.clone(),
                            status: discount.status.to_string(),
                        });
                    }
                    discount.enabled = !discount.enabled;
                    discount.updated_at = now.max(discount.created_at);
                    discount.refresh(now);
                    Ok(())
                }),
            )
            .await?;
        info!(id, enabled = toggled.enabled, "discount toggled");
        Ok(toggled)
    }
}
