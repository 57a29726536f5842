use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::CustomerMessage;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Message not found: {0}")]
    NotFound(Uuid),

    #[error("Reply text is empty")]
    EmptyReply,
}

/// The most recent items of a feed, newest first.
#[derive(Debug, Clone)]
pub struct RecentFeed<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RecentFeed<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Start from an already ordered list (newest first); extra items are dropped.
    pub fn from_seed(capacity: usize, seed: Vec<T>) -> Self {
        let mut items: VecDeque<T> = seed.into();
        items.truncate(capacity);
        Self { items, capacity }
    }

    pub fn push(&mut self, item: T) {
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_mut(&mut self, predicate: impl Fn(&T) -> bool) -> Option<&mut T> {
        self.items.iter_mut().find(|item| predicate(item))
    }
}

/// Customer messages with the artisan's replies.
#[derive(Debug, Clone)]
pub struct MessageInbox {
    messages: RecentFeed<CustomerMessage>,
}

impl MessageInbox {
    pub fn new(capacity: usize, seed: Vec<CustomerMessage>) -> Self {
        Self {
            messages: RecentFeed::from_seed(capacity, seed),
        }
    }

    pub fn receive(&mut self, message: CustomerMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> impl Iterator<Item = &CustomerMessage> {
        self.messages.iter()
    }

    pub fn unreplied_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.replied).count()
    }

    /// Answer a message; the reply is sent in the customer's language.
    pub fn reply(&mut self, message_id: Uuid, text: &str) -> Result<&CustomerMessage, FeedError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FeedError::EmptyReply);
        }

        let message = self
            .messages
            .find_mut(|m| m.id == message_id)
            .ok_or(FeedError::NotFound(message_id))?;

        message.translated_reply = Some(translate_reply(text, &message.original_language));
        message.my_reply = Some(text.to_string());
        message.replied = true;

        tracing::info!("Replied to {} in {}", message.customer_name, message.original_language);
        Ok(&*message)
    }
}

/// Canned translation of a reply. Unknown languages get the text back unchanged.
pub fn translate_reply(text: &str, language: &str) -> String {
    let translated = match language {
        "German" => "Ja, ich kann wunderschöne maßgeschneiderte Stücke mit traditionellen Motiven erstellen.",
        "French" => "Oui, je peux créer de belles pièces personnalisées avec des motifs traditionnels.",
        "Japanese" => "はい、伝統的なモチーフを使った美しいカスタム作品を作ることができます。",
        "Spanish" => "Sí, puedo crear hermosas piezas personalizadas con motivos tradicionales.",
        "Chinese" => "是的，我可以创作带有传统图案的美丽定制作品。",
        "Arabic" => "نعم، يمكنني إنشاء قطع مخصصة جميلة بزخارف تقليدية.",
        _ => text,
    };
    translated.to_string()
}

pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - timestamp).num_hours();
    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", hours / 24)
    }
}
