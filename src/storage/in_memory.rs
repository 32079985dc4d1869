//! In-memory implementation of DataService for testing and development

use crate::core::error::EntityError;
use crate::core::{Data, DataService};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_key: i64,
}

/// In-memory data service implementation
///
/// Keys start at 1 and are never reused. Business ids are unique, like the
/// unique column of the SQL backend. Uses RwLock for thread-safe access.
pub struct InMemoryDataService<T> {
    table: Arc<RwLock<Table<T>>>,
}

impl<T> Clone for InMemoryDataService<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<T> InMemoryDataService<T> {
    /// Create a new, empty in-memory data service
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                next_key: 1,
            })),
        }
    }
}

impl<T> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Data> InMemoryDataService<T> {
    fn not_found(key: i64) -> anyhow::Error {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            key,
        }
        .into()
    }

    fn duplicate(business_id: &str) -> anyhow::Error {
        EntityError::AlreadyExists {
            entity_type: T::resource_name_singular().to_string(),
            business_id: business_id.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl<T: Data> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if table
            .rows
            .values()
            .any(|row| row.business_id() == entity.business_id())
        {
            return Err(Self::duplicate(entity.business_id()));
        }

        let key = table.next_key;
        table.next_key += 1;

        let stored = entity.with_key(key);
        table.rows.insert(key, stored.clone());

        Ok(stored)
    }

    async fn get(&self, key: i64) -> Result<Option<T>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.get(&key).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.values().cloned().collect())
    }

    async fn update(&self, key: i64, entity: T) -> Result<T> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !table.rows.contains_key(&key) {
            return Err(Self::not_found(key));
        }

        if table
            .rows
            .iter()
            .any(|(k, row)| *k != key && row.business_id() == entity.business_id())
        {
            return Err(Self::duplicate(entity.business_id()));
        }

        let stored = entity.with_key(key);
        table.rows.insert(key, stored.clone());

        Ok(stored)
    }

    async fn delete(&self, key: i64) -> Result<()> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        table
            .rows
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Category;

    fn nike(code: &str) -> Category {
        Category::draft(code, "Nike", "Shoes", "M", 0.8, "kg")
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_keys() {
        let service = InMemoryDataService::<Category>::new();

        let first = service.create(nike("CAT-001")).await.unwrap();
        let second = service.create(nike("CAT-002")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_keys_are_not_reused() {
        let service = InMemoryDataService::<Category>::new();

        let first = service.create(nike("CAT-001")).await.unwrap();
        service.delete(first.id.unwrap()).await.unwrap();
        let second = service.create(nike("CAT-002")).await.unwrap();

        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_business_id() {
        let service = InMemoryDataService::<Category>::new();
        service.create(nike("CAT-001")).await.unwrap();

        let err = service.create(nike("CAT-001")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EntityError>(),
            Some(EntityError::AlreadyExists { .. })
        ));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let service = InMemoryDataService::<Category>::new();
        let created = service.create(nike("CAT-042")).await.unwrap();
        let key = created.id.unwrap();

        let mut changed = created.clone();
        changed.brand = "Puma".to_string();
        service.update(key, changed).await.unwrap();

        let stored = service.get(key).await.unwrap().unwrap();
        assert_eq!(stored.brand, "Puma");
        assert_eq!(stored.category_id, "CAT-042");
    }

    #[tokio::test]
    async fn test_update_missing_key_fails() {
        let service = InMemoryDataService::<Category>::new();
        let err = service.update(99, nike("CAT-001")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EntityError>(),
            Some(EntityError::NotFound { key: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_key_fails() {
        let service = InMemoryDataService::<Category>::new();
        assert!(service.delete(1).await.is_err());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let service = InMemoryDataService::<Category>::new();
        let handle = service.clone();

        service.create(nike("CAT-001")).await.unwrap();
        assert_eq!(handle.list().await.unwrap().len(), 1);
    }
}
