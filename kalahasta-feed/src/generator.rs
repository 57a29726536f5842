use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{CustomerMessage, Opportunity, OpportunityKind};
use crate::random::FeedRandom;

const LOCATIONS: [&str; 8] = [
    "Mumbai", "Delhi", "Bangalore", "London", "New York", "Tokyo", "Berlin", "Paris",
];

const AUDIENCES: [&str; 5] = [
    "interior designers",
    "art collectors",
    "cultural enthusiasts",
    "textile lovers",
    "home decorators",
];

struct Customer {
    name: &'static str,
    location: &'static str,
    language: &'static str,
    question: &'static str,
    question_en: &'static str,
}

const CUSTOMERS: [Customer; 4] = [
    Customer {
        name: "Emma Wilson",
        location: "UK",
        language: "English",
        question: "Is this piece available for international shipping?",
        question_en: "Is this piece available for international shipping?",
    },
    Customer {
        name: "Carlos Rodriguez",
        location: "Spain",
        language: "Spanish",
        question: "¿Cuánto tiempo toma crear una pieza similar?",
        question_en: "How long does it take to create a similar piece?",
    },
    Customer {
        name: "Li Wei",
        location: "China",
        language: "Chinese",
        question: "这件作品使用了什么材料？",
        question_en: "What materials were used in this artwork?",
    },
    Customer {
        name: "Ahmed Hassan",
        location: "UAE",
        language: "Arabic",
        question: "هل يمكنك إنشاء قطعة مخصصة؟",
        question_en: "Can you create a custom piece?",
    },
];

/// Produces the cosmetic opportunity and message notifications.
pub struct MockFeedGenerator<R: FeedRandom> {
    rng: R,
}

impl<R: FeedRandom> MockFeedGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// True with probability `chance`. Used once per timer tick.
    pub fn roll(&mut self, chance: f64) -> bool {
        self.rng.next_f64() > 1.0 - chance
    }

    /// The four opportunities a fresh dashboard starts with.
    pub fn seed_opportunities(&mut self, craft: &str, now: DateTime<Utc>) -> Vec<Opportunity> {
        let craft = craft_or_default(craft);
        let lower = craft.to_lowercase();

        let viewed_by = self.audience();
        let viewed_in = self.location();
        let view = Opportunity {
            id: Uuid::new_v4(),
            kind: OpportunityKind::View,
            message: format!(
                "Great news! Your {} with traditional motifs has been viewed 50 times by {} in {}.",
                lower, viewed_by, viewed_in
            ),
            timestamp: now - Duration::hours(2),
            location: Some(self.location().to_string()),
            audience: Some(self.audience().to_string()),
        };

        let feature = Opportunity {
            id: Uuid::new_v4(),
            kind: OpportunityKind::Feature,
            message: format!(
                "A blog focused on sustainable textiles has featured your profile and highlighted your traditional {} techniques.",
                lower
            ),
            timestamp: now - Duration::hours(6),
            location: None,
            audience: None,
        };

        let trend = Opportunity {
            id: Uuid::new_v4(),
            kind: OpportunityKind::Trend,
            message: format!(
                "Trending: {} pieces with natural dyes are gaining 40% more interest this month among international buyers.",
                craft
            ),
            timestamp: now - Duration::hours(12),
            location: None,
            audience: None,
        };

        let inquiry = Opportunity {
            id: Uuid::new_v4(),
            kind: OpportunityKind::Inquiry,
            message: format!(
                "5 new inquiries from {} customers interested in custom {} pieces.",
                self.location(),
                lower
            ),
            timestamp: now - Duration::hours(24),
            location: None,
            audience: None,
        };

        vec![view, feature, trend, inquiry]
    }

    pub fn next_opportunity(&mut self, craft: &str, now: DateTime<Utc>) -> Opportunity {
        let lower = craft_or_default(craft).to_lowercase();

        let kind = OpportunityKind::ALL[self.rng.pick(OpportunityKind::ALL.len())];
        let message = match self.rng.pick(5) {
            0 => format!("Your {} work is trending in {}!", lower, self.location()),
            1 => format!("New interest from {} in your latest pieces.", self.audience()),
            2 => format!("A cultural magazine wants to feature your traditional {} story.", lower),
            3 => format!("Export inquiry received from {} for bulk orders.", self.location()),
            _ => "Your work has been shared 25 times on social media this week.".to_string(),
        };

        Opportunity {
            id: Uuid::new_v4(),
            kind,
            message,
            timestamp: now,
            location: Some(self.location().to_string()),
            audience: Some(self.audience().to_string()),
        }
    }

    /// The three messages a fresh inbox starts with; one is already answered.
    pub fn seed_messages(&self, now: DateTime<Utc>) -> Vec<CustomerMessage> {
        vec![
            CustomerMessage {
                id: Uuid::new_v4(),
                customer_name: "Hans Mueller".to_string(),
                customer_location: "Germany".to_string(),
                original_message: "Was sind die Abmessungen dieses Stoffes?".to_string(),
                translated_message: "What are the dimensions of this fabric?".to_string(),
                original_language: "German".to_string(),
                timestamp: now - Duration::hours(2),
                replied: false,
                my_reply: None,
                translated_reply: None,
            },
            CustomerMessage {
                id: Uuid::new_v4(),
                customer_name: "Marie Dubois".to_string(),
                customer_location: "France".to_string(),
                original_message: "Pouvez-vous créer une pièce personnalisée avec des motifs floraux?".to_string(),
                translated_message: "Can you create a custom piece with floral motifs?".to_string(),
                original_language: "French".to_string(),
                timestamp: now - Duration::hours(5),
                replied: true,
                my_reply: Some(
                    "Yes, I can create beautiful custom pieces with traditional floral motifs. It would take about 15 days to complete."
                        .to_string(),
                ),
                translated_reply: Some(
                    "Oui, je peux créer de belles pièces personnalisées avec des motifs floraux traditionnels. Il faudrait environ 15 jours pour terminer."
                        .to_string(),
                ),
            },
            CustomerMessage {
                id: Uuid::new_v4(),
                customer_name: "Yuki Tanaka".to_string(),
                customer_location: "Japan".to_string(),
                original_message: "この作品の制作過程について教えてください。".to_string(),
                translated_message: "Please tell me about the creation process of this artwork.".to_string(),
                original_language: "Japanese".to_string(),
                timestamp: now - Duration::hours(8),
                replied: false,
                my_reply: None,
                translated_reply: None,
            },
        ]
    }

    /// A new unanswered question, written in the customer's own language.
    pub fn next_message(&mut self, now: DateTime<Utc>) -> CustomerMessage {
        let customer = &CUSTOMERS[self.rng.pick(CUSTOMERS.len())];

        CustomerMessage {
            id: Uuid::new_v4(),
            customer_name: customer.name.to_string(),
            customer_location: customer.location.to_string(),
            original_message: customer.question.to_string(),
            translated_message: customer.question_en.to_string(),
            original_language: customer.language.to_string(),
            timestamp: now,
            replied: false,
            my_reply: None,
            translated_reply: None,
        }
    }

    fn location(&mut self) -> &'static str {
        LOCATIONS[self.rng.pick(LOCATIONS.len())]
    }

    fn audience(&mut self) -> &'static str {
        AUDIENCES[self.rng.pick(AUDIENCES.len())]
    }
}

fn craft_or_default(craft: &str) -> &str {
    if craft.trim().is_empty() {
        "art"
    } else {
        craft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_seed_opportunities() {
        let mut generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.0]));
        let seeded = generator.seed_opportunities("Kalamkari", now());

        assert_eq!(seeded.len(), 4);
        assert_eq!(
            seeded[0].message,
            "Great news! Your kalamkari with traditional motifs has been viewed 50 times by interior designers in Mumbai."
        );
        assert_eq!(seeded[0].timestamp, now() - Duration::hours(2));
        assert_eq!(seeded[1].kind, OpportunityKind::Feature);
        assert!(seeded[2].message.starts_with("Trending: Kalamkari pieces"));
        assert_eq!(seeded[3].timestamp, now() - Duration::hours(24));
    }

    #[test]
    fn test_empty_craft_reads_as_art() {
        let mut generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.0]));
        let seeded = generator.seed_opportunities("", now());
        assert!(seeded[1].message.contains("traditional art techniques"));
    }

    #[test]
    fn test_next_opportunity_follows_draws() {
        // kind index 3 (Trend), template 2, location 0, audience 0
        let mut generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.8, 0.5, 0.0, 0.0]));
        let opportunity = generator.next_opportunity("Ikat", now());

        assert_eq!(opportunity.kind, OpportunityKind::Trend);
        assert_eq!(opportunity.message, "A cultural magazine wants to feature your traditional ikat story.");
        assert_eq!(opportunity.location.as_deref(), Some("Mumbai"));
        assert_eq!(opportunity.audience.as_deref(), Some("interior designers"));
        assert_eq!(opportunity.timestamp, now());
    }

    #[test]
    fn test_next_message_matches_language() {
        let mut generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.3]));
        let message = generator.next_message(now());

        assert_eq!(message.customer_name, "Carlos Rodriguez");
        assert_eq!(message.original_language, "Spanish");
        assert_eq!(message.translated_message, "How long does it take to create a similar piece?");
        assert!(!message.replied);
    }

    #[test]
    fn test_roll_uses_threshold() {
        let mut generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.75, 0.5]));
        assert!(generator.roll(0.3));
        assert!(!generator.roll(0.3));
    }

    #[test]
    fn test_seed_messages() {
        let generator = MockFeedGenerator::new(ScriptedRandom::new(vec![0.0]));
        let messages = generator.seed_messages(now());
        assert_eq!(messages.len(), 3);
        assert_eq!(messages.iter().filter(|m| m.replied).count(), 1);
    }
}
