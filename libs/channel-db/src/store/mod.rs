//! Record storage behind an injectable boundary.
//!
//! Repositories only talk to [`Store`], so the in-memory collection can be
//! swapped for a real database without touching filtering, paging or status
//! rules.

pub mod memory;

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

pub use memory::InMemoryStore;

/// A persisted entity the store can hold.
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Entity name used in error messages ("Discount not found").
    const ENTITY: &'static str;

    fn id(&self) -> &str;

    /// Called exactly once by the store on insert.
    fn assign_id(&mut self, id: String);

    fn created_at(&self) -> DateTime<Utc>;
}

/// In-place edit applied under the store's write guard. Returning an error
/// leaves the stored record untouched.
pub type Mutation<'a, R> = Box<dyn FnOnce(&mut R) -> Result<()> + Send + 'a>;

#[async_trait]
pub trait Store<R: Record>: Debug + Send + Sync {
    /// Assigns a fresh id and appends the record.
    async fn insert(&self, record: R) -> Result<R>;

    async fn find(&self, id: &str) -> Result<Option<R>>;

    /// Finds the record and applies `mutation` without releasing the lock in
    /// between. Fails with `NotFound` when `id` is absent.
    async fn modify(&self, id: &str, mutation: Mutation<'_, R>) -> Result<R>;

    /// Removes and returns the record. A second delete of the same id fails
    /// with `NotFound`.
    async fn remove(&self, id: &str) -> Result<R>;

    /// Every record in insertion order.
    async fn snapshot(&self) -> Result<Vec<R>>;
}
