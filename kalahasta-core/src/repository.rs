use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// String-keyed JSON persistence, the way the browser's local storage is used.
#[async_trait]
pub trait KeyedStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored value under '{key}' does not match its record type: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Read a single typed record. A blob of the wrong shape is `Corrupt`.
pub async fn load_record<T: DeserializeOwned>(
    store: &dyn KeyedStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { key: key.to_string(), source }),
        None => Ok(None),
    }
}

pub async fn save_record<T: Serialize + ?Sized>(
    store: &dyn KeyedStore,
    key: &str,
    record: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(record)?;
    store.set(key, value).await
}

/// Read a collection; a missing key is an empty collection.
pub async fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyedStore,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    Ok(load_record::<Vec<T>>(store, key).await?.unwrap_or_default())
}

pub async fn save_collection<T: Serialize>(
    store: &dyn KeyedStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    save_record(store, key, items).await
}
