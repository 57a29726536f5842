use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityKind {
    View,
    Feature,
    Inquiry,
    Trend,
}

impl OpportunityKind {
    pub const ALL: [OpportunityKind; 4] = [
        OpportunityKind::View,
        OpportunityKind::Feature,
        OpportunityKind::Inquiry,
        OpportunityKind::Trend,
    ];
}

/// A (mock) signal of audience interest in the artisan's work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub location: Option<String>,
    pub audience: Option<String>,
}

/// A (mock) buyer message, shown with its English translation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMessage {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_location: String,
    pub original_message: String,
    pub translated_message: String,
    pub original_language: String,
    pub timestamp: DateTime<Utc>,
    pub replied: bool,
    pub my_reply: Option<String>,
    pub translated_reply: Option<String>,
}

/// Something new for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedEvent {
    Opportunity(Opportunity),
    Message(CustomerMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let event = FeedEvent::Opportunity(Opportunity {
            id: Uuid::nil(),
            kind: OpportunityKind::Trend,
            message: "Trending".to_string(),
            timestamp: "2024-06-01T12:00:00Z".parse().unwrap(),
            location: None,
            audience: Some("art collectors".to_string()),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "OPPORTUNITY");
        assert_eq!(json["data"]["type"], "trend");
        assert_eq!(json["data"]["audience"], "art collectors");
    }
}
