use std::time::Duration;

use chrono::Utc;
use kalahasta_store::app_config::FeedConfig;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::generator::MockFeedGenerator;
use crate::models::FeedEvent;
use crate::random::{FeedRandom, SeededRandom};

/// `interval_at` rejects a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Publishes mock feed events from background tasks.
#[derive(Clone)]
pub struct FeedTicker {
    sender: broadcast::Sender<FeedEvent>,
}

impl FeedTicker {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.sender.subscribe()
    }

    /// Every `every`, emit a new opportunity with probability `chance`.
    pub fn spawn_opportunities<R>(
        &self,
        mut generator: MockFeedGenerator<R>,
        craft: String,
        every: Duration,
        chance: f64,
    ) -> JoinHandle<()>
    where
        R: FeedRandom + 'static,
    {
        let every = every.max(MIN_PERIOD);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + every, every);
            loop {
                ticks.tick().await;
                if generator.roll(chance) {
                    let opportunity = generator.next_opportunity(&craft, Utc::now());
                    publish(&sender, FeedEvent::Opportunity(opportunity));
                }
            }
        })
    }

    /// Every `every`, emit a new customer message with probability `chance`.
    pub fn spawn_messages<R>(&self, mut generator: MockFeedGenerator<R>, every: Duration, chance: f64) -> JoinHandle<()>
    where
        R: FeedRandom + 'static,
    {
        let every = every.max(MIN_PERIOD);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + every, every);
            loop {
                ticks.tick().await;
                if generator.roll(chance) {
                    let message = generator.next_message(Utc::now());
                    publish(&sender, FeedEvent::Message(message));
                }
            }
        })
    }

    /// Start both feeds with the configured cadence.
    pub fn spawn_from_config(&self, config: &FeedConfig, craft: &str) -> Vec<JoinHandle<()>> {
        let (opportunity_seed, message_seed) = ticker_seeds(config.seed);
        let opportunities = MockFeedGenerator::new(SeededRandom::new(opportunity_seed));
        let messages = MockFeedGenerator::new(SeededRandom::new(message_seed));

        tracing::info!(
            "Feed started: opportunities every {}s, messages every {}s",
            config.opportunity_interval_secs,
            config.message_interval_secs
        );

        vec![
            self.spawn_opportunities(
                opportunities,
                craft.to_string(),
                Duration::from_secs(config.opportunity_interval_secs),
                config.opportunity_chance,
            ),
            self.spawn_messages(
                messages,
                Duration::from_secs(config.message_interval_secs),
                config.message_chance,
            ),
        ]
    }
}

/// The plain seed belongs to the dashboard seeder; each ticker gets its own stream.
fn ticker_seeds(seed: Option<u64>) -> (Option<u64>, Option<u64>) {
    (seed.map(|s| s.wrapping_add(1)), seed.map(|s| s.wrapping_add(2)))
}

fn publish(sender: &broadcast::Sender<FeedEvent>, event: FeedEvent) {
    // No subscribers is fine; the event is simply dropped.
    if sender.send(event).is_err() {
        tracing::debug!("Feed event dropped, nobody is listening");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OpportunityKind;
    use crate::random::ScriptedRandom;

    #[tokio::test(start_paused = true)]
    async fn test_opportunity_emitted_on_lucky_tick() {
        let ticker = FeedTicker::new(16);
        let mut rx = ticker.subscribe();

        // roll 0.9 > 0.7, then kind 0.0 -> View
        let generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.9, 0.0, 0.0, 0.0, 0.0]));
        let handle = ticker.spawn_opportunities(generator, "Kalamkari".to_string(), Duration::from_secs(10), 0.3);

        match rx.recv().await.unwrap() {
            FeedEvent::Opportunity(opportunity) => {
                assert_eq!(opportunity.kind, OpportunityKind::View);
                assert!(opportunity.message.contains("kalamkari"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_unlucky_ticks_emit_nothing() {
        let ticker = FeedTicker::new(16);
        let mut rx = ticker.subscribe();

        let generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.5]));
        let handle = ticker.spawn_messages(generator, Duration::from_secs(15), 0.2);

        let waited = tokio::time::timeout(Duration::from_secs(120), rx.recv()).await;
        assert!(waited.is_err());
        handle.abort();
    }

    #[test]
    fn test_ticker_streams_differ_from_seeder() {
        assert_eq!(ticker_seeds(None), (None, None));
        assert_eq!(ticker_seeds(Some(u64::MAX)), (Some(0), Some(1)));

        let (opportunity_seed, _) = ticker_seeds(Some(7));
        let mut seeder = SeededRandom::new(Some(7));
        let mut ticker = SeededRandom::new(opportunity_seed);
        let seeder_draws: Vec<f64> = (0..4).map(|_| seeder.next_f64()).collect();
        let ticker_draws: Vec<f64> = (0..4).map(|_| ticker.next_f64()).collect();
        assert_ne!(seeder_draws, ticker_draws);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_still_ticks() {
        let ticker = FeedTicker::new(16);
        let mut rx = ticker.subscribe();

        let generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.95, 0.0]));
        let handle = ticker.spawn_messages(generator, Duration::ZERO, 0.2);

        match rx.recv().await.unwrap() {
            FeedEvent::Message(message) => assert_eq!(message.customer_name, "Emma Wilson"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(!handle.is_finished());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_emitted() {
        let ticker = FeedTicker::new(16);
        let mut rx = ticker.subscribe();

        let generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.95, 0.6]));
        let handle = ticker.spawn_messages(generator, Duration::from_secs(15), 0.2);

        match rx.recv().await.unwrap() {
            FeedEvent::Message(message) => assert_eq!(message.customer_name, "Li Wei"),
            other => panic!("unexpected event: {:?}", other),
        }
        handle.abort();
    }
}
