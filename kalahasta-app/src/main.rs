use anyhow::Context;
use chrono::Utc;
use kalahasta_app::{init_tracing, AppState, DashboardSummary};
use kalahasta_core::IdentityProvider;
use kalahasta_feed::{FeedEvent, MessageInbox, MockFeedGenerator, RecentFeed, SeededRandom};
use kalahasta_store::app_config::Config;
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    init_tracing(&config.log.filter);

    tracing::info!("Starting KalaHasta ({:?} storage)", config.storage.backend);
    let state = AppState::from_config(config).await?;

    let session = state.identity.restore_session().await?;
    let craft = match &session {
        Some(session) => {
            let summary = DashboardSummary::collect(&state, session).await?;
            tracing::info!(
                "Welcome back {}: {} products worth {}, {} recordings ({} in bin), {} certificates",
                session.display_name(),
                summary.products,
                summary.catalog_value,
                summary.recordings,
                summary.binned_recordings,
                summary.certifications
            );
            session.craft().to_string()
        }
        None => {
            tracing::info!("No saved session, showing the feed for guests");
            String::new()
        }
    };

    let capacity = state.config.feed.capacity;
    let mut seeder = MockFeedGenerator::new(SeededRandom::new(state.config.feed.seed));
    let now = Utc::now();
    let mut opportunities = RecentFeed::from_seed(capacity, seeder.seed_opportunities(&craft, now));
    let mut inbox = MessageInbox::new(capacity, seeder.seed_messages(now));
    tracing::info!(
        "{} opportunities, {} unanswered messages",
        opportunities.len(),
        inbox.unreplied_count()
    );

    let mut events = state.feed.subscribe();
    let tasks = state.feed.spawn_from_config(&state.config.feed, &craft);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(FeedEvent::Opportunity(opportunity)) => {
                    tracing::info!("[{:?}] {}", opportunity.kind, opportunity.message);
                    opportunities.push(opportunity);
                }
                Ok(FeedEvent::Message(message)) => {
                    tracing::info!(
                        "New message from {} ({}): {}",
                        message.customer_name,
                        message.customer_location,
                        message.translated_message
                    );
                    inbox.receive(message);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Feed lagged, {} events skipped", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    for task in tasks {
        task.abort();
    }
    Ok(())
}
