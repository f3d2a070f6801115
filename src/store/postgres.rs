use anyhow::Result;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use super::{DocumentStore, StoreError, VersionedDocument};
use crate::models::Client;

/// Production adapter: one Postgres row per client document. The `document`
/// column holds the whole client as JSONB; `revision`, `created_at` and
/// `updated_at` are store bookkeeping and are stripped before a document is
/// handed back.
#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clients (
                id TEXT PRIMARY KEY,
                document JSONB NOT NULL,
                revision BIGINT NOT NULL DEFAULT 1,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn decode(document: serde_json::Value, id: &str) -> Result<Client, StoreError> {
        serde_json::from_value(document).map_err(|e| {
            StoreError::Backend(anyhow::anyhow!("corrupt document for client '{id}': {e}"))
        })
    }

    fn encode(client: &Client) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(client).map_err(|e| StoreError::Backend(e.into()))
    }
}

#[async_trait]
impl DocumentStore for Database {
    async fn put(&self, mut client: Client) -> Result<Client, StoreError> {
        if client.id.is_empty() {
            client.id = Uuid::new_v4().to_string();
        }

        let document = Self::encode(&client)?;
        let insert = sqlx::query("INSERT INTO clients (id, document) VALUES ($1, $2)")
            .bind(&client.id)
            .bind(&document)
            .execute(&self.pool)
            .await;

        if let Err(err) = insert {
            if let sqlx::Error::Database(db_err) = &err {
                if db_err.is_unique_violation() {
                    return Err(StoreError::Duplicate(client.id));
                }
            }
            return Err(err.into());
        }

        // Read-after-write so the caller observes the stored shape.
        self.get(&client.id).await
    }

    async fn get(&self, id: &str) -> Result<Client, StoreError> {
        Ok(self.get_versioned(id).await?.client)
    }

    async fn get_versioned(&self, id: &str) -> Result<VersionedDocument, StoreError> {
        let row = sqlx::query("SELECT document, revision FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let client = Self::decode(row.get("document"), id)?;
        Ok(VersionedDocument {
            client,
            revision: row.get("revision"),
        })
    }

    async fn replace(
        &self,
        id: &str,
        client: &Client,
        expected_revision: i64,
    ) -> Result<(), StoreError> {
        let document = Self::encode(client)?;
        let result = sqlx::query(
            r#"
            UPDATE clients SET document = $2, revision = revision + 1, updated_at = NOW()
            WHERE id = $1 AND revision = $3
            "#,
        )
        .bind(id)
        .bind(&document)
        .bind(expected_revision)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Zero rows means either the document vanished or another writer
        // bumped the revision; a point read tells the two apart.
        match self.get_versioned(id).await {
            Ok(_) => Err(StoreError::Conflict(id.to_string())),
            Err(StoreError::NotFound(_)) => Err(StoreError::NotFound(id.to_string())),
            Err(other) => Err(other),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Client>, StoreError> {
        let rows = sqlx::query("SELECT id, document FROM clients ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let id: String = row.get("id");
                Self::decode(row.get("document"), &id)
            })
            .collect()
    }
}
