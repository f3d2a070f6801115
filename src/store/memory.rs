use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, StoreError, VersionedDocument};
use crate::models::Client;

struct StoredDocument {
    client: Client,
    revision: i64,
    inserted: u64,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<String, StoredDocument>,
    insert_seq: u64,
}

/// In-process adapter with the same revision and duplicate-id semantics as
/// the Postgres one. Backs the test suite and demo runs without a database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put(&self, mut client: Client) -> Result<Client, StoreError> {
        if client.id.is_empty() {
            client.id = Uuid::new_v4().to_string();
        }

        let mut inner = self.inner.write().await;
        if inner.documents.contains_key(&client.id) {
            return Err(StoreError::Duplicate(client.id));
        }

        let id = client.id.clone();
        inner.insert_seq += 1;
        let inserted = inner.insert_seq;
        inner.documents.insert(
            id.clone(),
            StoredDocument {
                client,
                revision: 1,
                inserted,
            },
        );

        // Same read-after-write contract as the Postgres adapter.
        inner
            .documents
            .get(&id)
            .map(|stored| stored.client.clone())
            .ok_or_else(|| StoreError::NotFound(id))
    }

    async fn get(&self, id: &str) -> Result<Client, StoreError> {
        Ok(self.get_versioned(id).await?.client)
    }

    async fn get_versioned(&self, id: &str) -> Result<VersionedDocument, StoreError> {
        let inner = self.inner.read().await;
        inner
            .documents
            .get(id)
            .map(|stored| VersionedDocument {
                client: stored.client.clone(),
                revision: stored.revision,
            })
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn replace(
        &self,
        id: &str,
        client: &Client,
        expected_revision: i64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if stored.revision != expected_revision {
            return Err(StoreError::Conflict(id.to_string()));
        }

        stored.client = client.clone();
        stored.revision += 1;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Client>, StoreError> {
        let inner = self.inner.read().await;
        let mut stored: Vec<_> = inner.documents.values().collect();
        // Insertion order, matching the created_at ordering of the Postgres
        // adapter's scan.
        stored.sort_by_key(|s| s.inserted);
        Ok(stored.iter().map(|s| s.client.clone()).collect())
    }
}
