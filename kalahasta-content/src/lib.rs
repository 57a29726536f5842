pub mod certifications;
pub mod models;
pub mod products;
pub mod recordings;

use std::sync::Arc;

use kalahasta_catalog::{ProductError, ValuationEngine};
use kalahasta_core::{KeyedStore, StoreError};
use uuid::Uuid;

pub use models::{format_duration, Certification, NewRecording, Recording};

/// Per-user collections: products, story recordings and certificates.
///
/// Every operation takes the caller's `Session`; nothing here knows who is
/// signed in on its own.
pub struct ContentStore {
    store: Arc<dyn KeyedStore>,
    engine: ValuationEngine,
}

impl ContentStore {
    pub fn new(store: Arc<dyn KeyedStore>, engine: ValuationEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    fn store(&self) -> &dyn KeyedStore {
        self.store.as_ref()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
