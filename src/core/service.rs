//! Service trait for record storage and the repository facade over it

use crate::core::Data;
use crate::core::error::EntityError;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Service trait for managing persisted records
///
/// Implementations provide CRUD operations for a specific record type.
/// Keys are assigned by the backend on `create`.
#[async_trait]
pub trait DataService<T: Data>: Send + Sync {
    /// Insert a new record and return it stamped with its storage key
    async fn create(&self, entity: T) -> Result<T>;

    /// Get a record by storage key
    async fn get(&self, key: i64) -> Result<Option<T>>;

    /// List all records
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace the stored fields of an existing record
    ///
    /// Fails with [`EntityError::NotFound`] when no record has this key.
    async fn update(&self, key: i64, entity: T) -> Result<T>;

    /// Delete a record
    ///
    /// Fails with [`EntityError::NotFound`] when no record has this key.
    async fn delete(&self, key: i64) -> Result<()>;
}

/// Generic repository facade over a [`DataService`].
///
/// Takes whole records instead of keys and carries the business-id prefix
/// for its record type. It holds no business rules.
pub struct Repository<T: Data> {
    service: Arc<dyn DataService<T>>,
    key_prefix: String,
}

impl<T: Data> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            key_prefix: self.key_prefix.clone(),
        }
    }
}

impl<T: Data> Repository<T> {
    pub fn new(service: Arc<dyn DataService<T>>, key_prefix: impl Into<String>) -> Self {
        Self {
            service,
            key_prefix: key_prefix.into(),
        }
    }

    /// Prefix used when generating business ids for this record type
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    pub async fn find_all(&self) -> Result<Vec<T>> {
        let records = self.service.list().await?;
        tracing::debug!(
            entity = T::resource_name(),
            count = records.len(),
            "loaded records"
        );
        Ok(records)
    }

    pub async fn save(&self, record: T) -> Result<T> {
        tracing::debug!(
            entity = T::resource_name_singular(),
            business_id = record.business_id(),
            "saving record"
        );
        self.service.create(record).await
    }

    pub async fn update(&self, record: T) -> Result<T> {
        let key = Self::require_key(&record)?;
        tracing::debug!(
            entity = T::resource_name_singular(),
            key,
            business_id = record.business_id(),
            "updating record"
        );
        self.service.update(key, record).await
    }

    pub async fn delete(&self, record: &T) -> Result<()> {
        let key = Self::require_key(record)?;
        tracing::debug!(
            entity = T::resource_name_singular(),
            key,
            business_id = record.business_id(),
            "deleting record"
        );
        self.service.delete(key).await
    }

    fn require_key(record: &T) -> Result<i64> {
        record.key().ok_or_else(|| {
            EntityError::NotPersisted {
                entity_type: T::resource_name_singular().to_string(),
                business_id: record.business_id().to_string(),
            }
            .into()
        })
    }
}
