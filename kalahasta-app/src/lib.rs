pub mod dashboard;
pub mod error;
pub mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use dashboard::DashboardSummary;
pub use error::AppError;
pub use state::AppState;

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
