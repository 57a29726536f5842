use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use kalahasta_catalog::PricingConfig;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub path: PathBuf,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_data_dir(),
        }
    }
}

/// Cadence of the mock notification feed
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    #[serde(default = "default_opportunity_interval")]
    pub opportunity_interval_secs: u64,
    /// Probability that a tick produces an opportunity
    #[serde(default = "default_opportunity_chance")]
    pub opportunity_chance: f64,
    #[serde(default = "default_message_interval")]
    pub message_interval_secs: u64,
    #[serde(default = "default_message_chance")]
    pub message_chance: f64,
    /// How many recent items each feed keeps
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Fixed seed for reproducible demo runs
    pub seed: Option<u64>,
}

fn default_opportunity_interval() -> u64 { 10 }
fn default_opportunity_chance() -> f64 { 0.3 }
fn default_message_interval() -> u64 { 15 }
fn default_message_chance() -> f64 { 0.2 }
fn default_capacity() -> usize { 5 }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            opportunity_interval_secs: default_opportunity_interval(),
            opportunity_chance: default_opportunity_chance(),
            message_interval_secs: default_message_interval(),
            message_chance: default_message_chance(),
            capacity: default_capacity(),
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String { "kalahasta=info,kalahasta_core=info,kalahasta_content=info".to_string() }

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local, uncommitted overrides
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `KALAHASTA__STORAGE__BACKEND=file`
            .add_source(
                config::Environment::with_prefix("KALAHASTA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
