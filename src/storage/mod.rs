//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::InMemoryDataService;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDataService;

use crate::config::StorageConfig;
use crate::core::error::{CatalogResult, StorageError};
use crate::core::{Data, DataService};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Build the backend named by `config`.
pub async fn connect<T>(config: &StorageConfig) -> CatalogResult<Arc<dyn DataService<T>>>
where
    T: Data + Serialize + DeserializeOwned,
{
    match config {
        StorageConfig::InMemory => {
            tracing::info!(entity = T::resource_name(), "using in-memory storage");
            Ok(Arc::new(InMemoryDataService::<T>::new()))
        }
        #[cfg(feature = "sqlite")]
        StorageConfig::Sqlite { url } => {
            let pool = sqlite::open_pool(url)
                .await
                .map_err(|e| connection_error("sqlite", &e))?;
            sqlite::ensure_schema(&pool)
                .await
                .map_err(|e| connection_error("sqlite", &e))?;
            tracing::info!(entity = T::resource_name(), url = %url, "using sqlite storage");
            Ok(Arc::new(SqliteDataService::<T>::new(pool)))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageConfig::Sqlite { .. } => Err(StorageError::Connection {
            backend: "sqlite".to_string(),
            message: "built without the `sqlite` feature".to_string(),
        }
        .into()),
    }
}

#[cfg(feature = "sqlite")]
fn connection_error(backend: &str, err: &anyhow::Error) -> crate::core::CatalogError {
    StorageError::Connection {
        backend: backend.to_string(),
        message: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Category;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let service = connect::<Category>(&StorageConfig::InMemory).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[cfg(not(feature = "sqlite"))]
    #[tokio::test]
    async fn test_connect_sqlite_without_feature_fails() {
        let config = StorageConfig::Sqlite {
            url: "sqlite::memory:".to_string(),
        };
        let err = connect::<Category>(&config).await.err().unwrap();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}
