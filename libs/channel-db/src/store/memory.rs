use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Mutation, Record, Store};
use crate::error::{Result, StoreError};

#[derive(Debug)]
struct Inner<R> {
    records: Vec<R>,
    next_seq: u64,
}

/// Vec-backed store. Reads share the lock, every mutation takes it
/// exclusively so nobody observes a collection mid-splice.
#[derive(Debug)]
pub struct InMemoryStore<R> {
    prefix: &'static str,
    inner: RwLock<Inner<R>>,
}

impl<R: Record> InMemoryStore<R> {
    /// Empty store whose ids look like `{prefix}1`, `{prefix}2`, ...
    pub fn new(prefix: &'static str) -> Self {
        Self::seeded(prefix, Vec::new())
    }

    /// Store pre-filled with records that already carry ids. The sequence
    /// continues after the highest numeric suffix found among them.
    pub fn seeded(prefix: &'static str, records: Vec<R>) -> Self {
        let highest = records
            .iter()
            .filter_map(|r| r.id().strip_prefix(prefix))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            prefix,
            inner: RwLock::new(Inner {
                records,
                next_seq: highest + 1,
            }),
        }
    }
}

#[async_trait]
impl<R: Record> Store<R> for InMemoryStore<R> {
    async fn insert(&self, mut record: R) -> Result<R> {
        let mut inner = self.inner.write().await;

        let mut id = format!("{}{}", self.prefix, inner.next_seq);
        inner.next_seq += 1;
        while inner.records.iter().any(|r| r.id() == id) {
            id = format!("{}{}", self.prefix, inner.next_seq);
            inner.next_seq += 1;
        }

        record.assign_id(id);
        debug!(entity = R::ENTITY, id = record.id(), "inserting record");
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn find(&self, id: &str) -> Result<Option<R>> {
        let inner = self.inner.read().await;
        Ok(inner.records.iter().find(|r| r.id() == id).cloned())
    }

    async fn modify(&self, id: &str, mutation: Mutation<'_, R>) -> Result<R> {
        let mut inner = self.inner.write().await;

        let slot = inner
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(R::ENTITY, id))?;

        let mut draft = slot.clone();
        mutation(&mut draft)?;
        *slot = draft.clone();

        debug!(entity = R::ENTITY, id, "record modified");
        Ok(draft)
    }

    async fn remove(&self, id: &str) -> Result<R> {
        let mut inner = self.inner.write().await;

        let idx = inner
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(R::ENTITY, id))?;

        debug!(entity = R::ENTITY, id, "removing record");
        Ok(inner.records.remove(idx))
    }

    async fn snapshot(&self) -> Result<Vec<R>> {
        Ok(self.inner.read().await.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        body: String,
        created_at: DateTime<Utc>,
    }

    impl Note {
        fn new(body: &str) -> Self {
            Self {
                id: String::new(),
                body: body.to_string(),
                created_at: Utc::now(),
            }
        }
    }

    impl Record for Note {
        const ENTITY: &'static str = "Note";

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

    #[tokio::test]
    async fn ids_are_unique_and_never_reused() {
        let store = InMemoryStore::<Note>::new("n");
        let first = store.insert(Note::new("one")).await.unwrap();
        let second = store.insert(Note::new("two")).await.unwrap();
        assert_eq!(first.id, "n1");
        assert_eq!(second.id, "n2");

        store.remove("n2").await.unwrap();
        let third = store.insert(Note::new("three")).await.unwrap();
        assert_eq!(third.id, "n3");
    }

    #[tokio::test]
    async fn seeded_sequence_continues_after_highest_suffix() {
        let mut seeded = Note::new("seed");
        seeded.id = "n7".to_string();
        let store = InMemoryStore::<Note>::seeded("n", vec![seeded]);

        let next = store.insert(Note::new("next")).await.unwrap();
        assert_eq!(next.id, "n8");
    }

    #[tokio::test]
    async fn failed_mutation_leaves_record_untouched() {
        let store = InMemoryStore::<Note>::new("n");
        let note = store.insert(Note::new("original")).await.unwrap();

        let result = store
            .modify(
                &note.id,
                Box::new(|n: &mut Note| {
                    n.body = "changed".to_string();
                    Err(StoreError::validation("nope"))
                }),
            )
            .await;

        assert!(result.is_err());
        let stored = store.find(&note.id).await.unwrap().unwrap();
        assert_eq!(stored.body, "original");
    }

    #[tokio::test]
    async fn second_remove_is_not_found() {
        let store = InMemoryStore::<Note>::new("n");
        let note = store.insert(Note::new("gone")).await.unwrap();

        store.remove(&note.id).await.unwrap();
        let again = store.remove(&note.id).await;
        assert!(matches!(again, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn modify_unknown_id_is_not_found() {
        let store: InMemoryStore<Note> = InMemoryStore::new("n");
        let result = store.modify("n42", Box::new(|_: &mut Note| Ok(()))).await;
        assert!(matches!(result, Err(StoreError::NotFound { entity: "Note", .. })));
    }

    #[tokio::test]
    async fn snapshot_keeps_insertion_order() {
        let store = InMemoryStore::<Note>::new("n");
        for body in ["a", "b", "c"] {
            store.insert(Note::new(body)).await.unwrap();
        }
        let bodies: Vec<_> = store
            .snapshot()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.body)
            .collect();
        assert_eq!(bodies, ["a", "b", "c"]);
    }
}
