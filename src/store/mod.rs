use async_trait::async_trait;
use thiserror::Error;

use crate::models::Client;

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no document stored for client '{0}'")]
    NotFound(String),

    #[error("a document for client '{0}' already exists")]
    Duplicate(String),

    #[error("revision conflict replacing document for client '{0}'")]
    Conflict(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.into())
    }
}

/// A client document together with the revision token it was read at. The
/// token is store bookkeeping and never leaves the repository layer.
#[derive(Debug, Clone)]
pub struct VersionedDocument {
    pub client: Client,
    pub revision: i64,
}

/// Point operations against the single logical container of client
/// documents. There is no partial update: every mutation re-sends the whole
/// document through `replace`, conditioned on the revision it was read at.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document, generating a fresh id when the supplied one is
    /// empty. Fails with `Duplicate` when the id is already taken. Returns
    /// the freshly-read document, not the write echo.
    async fn put(&self, client: Client) -> Result<Client, StoreError>;

    /// Point read with store bookkeeping stripped.
    async fn get(&self, id: &str) -> Result<Client, StoreError>;

    /// Point read returning the current revision token alongside the
    /// document; the read half of an optimistic replace cycle.
    async fn get_versioned(&self, id: &str) -> Result<VersionedDocument, StoreError>;

    /// Whole-document overwrite, conditioned on the stored revision still
    /// being `expected_revision`. Fails with `Conflict` when another writer
    /// replaced the document in between.
    async fn replace(
        &self,
        id: &str,
        client: &Client,
        expected_revision: i64,
    ) -> Result<(), StoreError>;

    /// Remove the document. Surfaces `NotFound` when already absent.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Full-container scan. Unpaginated; the dataset is demo-scale.
    async fn list_all(&self) -> Result<Vec<Client>, StoreError>;
}
