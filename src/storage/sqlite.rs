//! SQLite storage backend using sqlx.
//!
//! Provides `SqliteDataService<T>` backed by a SQLite database via
//! `sqlx::SqlitePool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag:
//! ```toml
//! [dependencies]
//! category-desk = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! # Schema
//!
//! Records of every type share one `records` table: the storage key is an
//! autoincrement integer, the business id gets its own column so the
//! database enforces uniqueness per record type, and the remaining fields
//! live in a JSON `data` column.

use crate::core::error::EntityError;
use crate::core::{Data, DataService};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required table and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            entity_type TEXT NOT NULL,
            business_id TEXT NOT NULL,
            data TEXT NOT NULL,
            UNIQUE (entity_type, business_id)
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create records table: {}", e))?;

    Ok(())
}

/// Open a pool for `url` (e.g. `sqlite://catalog.db` or `sqlite::memory:`).
///
/// The pool holds a single long-lived connection: the form runs on one
/// thread, and an in-memory database only lives as long as its connection.
pub async fn open_pool(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| anyhow!("Invalid SQLite url '{}': {}", url, e))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<std::time::Duration>)
        .max_lifetime(None::<std::time::Duration>)
        .connect_with(options)
        .await
        .map_err(|e| anyhow!("Failed to open SQLite database '{}': {}", url, e))
}

// ---------------------------------------------------------------------------
// SqliteDataService<T>
// ---------------------------------------------------------------------------

/// Generic data storage service backed by SQLite.
///
/// # Example
///
/// ```rust,ignore
/// use category_desk::storage::sqlite::{ensure_schema, open_pool};
/// use category_desk::storage::SqliteDataService;
///
/// let pool = open_pool("sqlite://catalog.db").await?;
/// ensure_schema(&pool).await?;
/// let service = SqliteDataService::<Category>::new(pool);
/// ```
#[derive(Clone, Debug)]
pub struct SqliteDataService<T> {
    pool: SqlitePool,
    _marker: std::marker::PhantomData<T>,
}

impl<T> SqliteDataService<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: Data + Serialize + DeserializeOwned> SqliteDataService<T> {
    fn entity_type_name() -> &'static str {
        T::resource_name_singular()
    }

    /// Serialize a record for the `data` column, without its key.
    fn extract_data(entity: &T) -> Result<String> {
        let mut data = serde_json::to_value(entity)
            .map_err(|e| anyhow!("Failed to serialize entity: {}", e))?;

        if let Some(obj) = data.as_object_mut() {
            obj.remove("id");
        }

        Ok(data.to_string())
    }

    /// Rebuild a record from its key and `data` column.
    fn reconstruct_entity(key: i64, data: &str) -> Result<T> {
        let entity: T = serde_json::from_str(data)
            .map_err(|e| anyhow!("Failed to deserialize entity from row: {}", e))?;
        Ok(entity.with_key(key))
    }

    fn map_write_error(err: sqlx::Error, business_id: &str) -> anyhow::Error {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => EntityError::AlreadyExists {
                entity_type: Self::entity_type_name().to_string(),
                business_id: business_id.to_string(),
            }
            .into(),
            _ => anyhow!("Failed to write entity: {}", err),
        }
    }

    fn not_found(key: i64) -> anyhow::Error {
        EntityError::NotFound {
            entity_type: Self::entity_type_name().to_string(),
            key,
        }
        .into()
    }
}

#[async_trait]
impl<T: Data + Serialize + DeserializeOwned> DataService<T> for SqliteDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let data = Self::extract_data(&entity)?;

        let result = sqlx::query(
            "INSERT INTO records (entity_type, business_id, data) VALUES (?, ?, ?)",
        )
        .bind(Self::entity_type_name())
        .bind(entity.business_id())
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, entity.business_id()))?;

        Ok(entity.with_key(result.last_insert_rowid()))
    }

    async fn get(&self, key: i64) -> Result<Option<T>> {
        let row = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, data FROM records WHERE id = ? AND entity_type = ?",
        )
        .bind(key)
        .bind(Self::entity_type_name())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to get entity: {}", e))?;

        row.map(|(id, data)| Self::reconstruct_entity(id, &data))
            .transpose()
    }

    async fn list(&self) -> Result<Vec<T>> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, data FROM records WHERE entity_type = ? ORDER BY id",
        )
        .bind(Self::entity_type_name())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list entities: {}", e))?;

        rows.into_iter()
            .map(|(id, data)| Self::reconstruct_entity(id, &data))
            .collect()
    }

    async fn update(&self, key: i64, entity: T) -> Result<T> {
        let data = Self::extract_data(&entity)?;

        let result = sqlx::query(
            "UPDATE records SET business_id = ?, data = ? WHERE id = ? AND entity_type = ?",
        )
        .bind(entity.business_id())
        .bind(&data)
        .bind(key)
        .bind(Self::entity_type_name())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, entity.business_id()))?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(key));
        }

        Ok(entity.with_key(key))
    }

    async fn delete(&self, key: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM records WHERE id = ? AND entity_type = ?")
            .bind(key)
            .bind(Self::entity_type_name())
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete entity: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(key));
        }

        Ok(())
    }
}
