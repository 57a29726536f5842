pub mod app_config;
pub mod file_store;
pub mod memory;

use std::sync::Arc;

use app_config::{StorageBackend, StorageConfig};
use kalahasta_core::{KeyedStore, StoreError};

pub use file_store::FileStore;
pub use memory::MemoryStore;

/// Build the configured keyed store backend.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeyedStore>, StoreError> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            tracing::info!("Using file store at {}", config.path.display());
            Ok(Arc::new(FileStore::open(&config.path).await?))
        }
    }
}
