use std::sync::Arc;

use anyhow::Context;
use kalahasta_catalog::ValuationEngine;
use kalahasta_content::ContentStore;
use kalahasta_core::{IdentityStore, KeyedStore, OtpGenerator, RandomOtp};
use kalahasta_store::app_config::Config;
use kalahasta_store::open_store;
use kalahasta_feed::FeedTicker;

/// Events a slow subscriber may fall behind by before it sees `Lagged`.
pub const FEED_EVENT_BUFFER: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub identity: Arc<IdentityStore>,
    pub content: Arc<ContentStore>,
    pub engine: ValuationEngine,
    pub feed: FeedTicker,
}

impl AppState {
    /// Open the configured backend and wire every service onto it.
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let store = open_store(&config.storage)
            .await
            .context("Failed to open keyed store")?;
        Ok(Self::with_store(config, store, Box::new(RandomOtp)))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyedStore>, otp: Box<dyn OtpGenerator>) -> Self {
        let engine = ValuationEngine::new(config.pricing.clone());
        let identity = Arc::new(IdentityStore::new(store.clone(), otp));
        let content = Arc::new(ContentStore::new(store, engine.clone()));
        let feed = FeedTicker::new(FEED_EVENT_BUFFER);

        Self {
            config,
            identity,
            content,
            engine,
            feed,
        }
    }
}
