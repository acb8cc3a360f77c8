pub mod memory;
pub mod sled_store;

pub use memory::InMemoryFaqStore;
pub use sled_store::SledFaqStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{AppError, Result};
use crate::models::FaqRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Boundary to the FAQ knowledge base.
///
/// Both operations may fail transiently; the engine treats failures as
/// skip/continue, never as fatal.
#[async_trait]
pub trait FaqStore: Send + Sync {
    /// Load the full FAQ corpus
    async fn load_all(&self) -> Result<Vec<FaqRecord>>;

    /// Increment a record's usage counter
    async fn increment_usage(&self, id: i64) -> Result<()>;
}

/// Create a store from configuration
pub fn create_store(config: &StorageConfig) -> Result<Arc<dyn FaqStore>> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryFaqStore::new())),
        StorageBackend::Sled => {
            let path = config.path.as_ref().ok_or_else(|| {
                AppError::Configuration("sled backend requires storage.path".to_string())
            })?;
            Ok(Arc::new(SledFaqStore::new(path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_memory_store() {
        let config = StorageConfig::default();
        assert!(create_store(&config).is_ok());
    }

    #[test]
    fn test_sled_store_requires_path() {
        let config = StorageConfig {
            backend: StorageBackend::Sled,
            path: None,
        };
        assert!(matches!(
            create_store(&config),
            Err(AppError::Configuration(_))
        ));
    }
}
