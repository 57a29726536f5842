use std::collections::HashMap;

use async_trait::async_trait;
use kalahasta_core::{KeyedStore, StoreError};
use serde_json::Value;
use tokio::sync::RwLock;

/// Volatile keyed store; everything is lost with the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyedStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        tracing::debug!("set {}", key);
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        tracing::debug!("remove {}", key);
        self.entries.write().await.remove(key);
        Ok(())
    }
}
