pub mod feed;
pub mod generator;
pub mod models;
pub mod random;
pub mod ticker;

pub use feed::{time_ago, translate_reply, FeedError, MessageInbox, RecentFeed};
pub use generator::MockFeedGenerator;
pub use models::{CustomerMessage, FeedEvent, Opportunity, OpportunityKind};
pub use random::{FeedRandom, ScriptedRandom, SeededRandom};
pub use ticker::FeedTicker;
