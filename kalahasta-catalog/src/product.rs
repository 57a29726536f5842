use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::{Complexity, PriceCheck, PricingInput, ValuationEngine};

/// Staging scenes offered for any product that has at least one image.
pub const STAGING_VIEWS: [&str; 5] = [
    "Gallery Wall View",
    "Modern Living Room",
    "Boutique Hotel Lobby",
    "Traditional Home Setting",
    "Art Studio Display",
];

/// A listed product in an artisan's showcase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub staging_views: Vec<String>,
    pub days_to_create: u32,
    pub complexity: Complexity,
    #[serde(default)]
    pub materials: String,
    pub timestamp: DateTime<Utc>,
}

/// The "add product" form before it becomes a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,

    /// Manual price; `None` or zero falls back to the suggested price
    pub price: Option<i64>,

    pub images: Vec<String>,
    pub days_to_create: u32,
    pub complexity: Complexity,
    pub materials: String,

    /// Calculator inputs; complexity and days are taken from the draft itself
    pub pricing: PricingInput,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, pricing: PricingInput) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: None,
            images: Vec::new(),
            days_to_create: pricing.days_to_create.max(1),
            complexity: pricing.complexity,
            materials: String::new(),
            pricing,
        }
    }

    /// Validate the draft and turn it into a listing.
    ///
    /// A manual price is kept even when it falls outside the suggested band;
    /// that case is only logged.
    pub fn finalize(self, engine: &ValuationEngine) -> Result<Product, ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::MissingField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(ProductError::MissingField("description"));
        }

        let days_to_create = self.days_to_create.max(1);
        let pricing = PricingInput {
            complexity: self.complexity,
            days_to_create,
            ..self.pricing
        };
        let range = engine.quote(&pricing);

        let price = match self.price {
            Some(manual) if manual > 0 => {
                let check = engine.check_price(manual, &range);
                if check != PriceCheck::WithinRange {
                    tracing::warn!(
                        "Manual price {} for '{}' is {:?} (suggested {}..={})",
                        manual, self.name, check, range.suggested_min, range.suggested_max
                    );
                }
                manual
            }
            _ => range.suggested,
        };

        let staging_views = staging_views_for(&self.images);

        Ok(Product {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            price,
            images: self.images,
            staging_views,
            days_to_create,
            complexity: self.complexity,
            materials: self.materials,
            timestamp: Utc::now(),
        })
    }
}

/// Partial edit of a listed product; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub images: Option<Vec<String>>,
    pub days_to_create: Option<u32>,
    pub complexity: Option<Complexity>,
    pub materials: Option<String>,
}

impl Product {
    /// All-or-nothing: a rejected update leaves the product untouched.
    pub fn apply(&mut self, update: ProductUpdate) -> Result<(), ProductError> {
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ProductError::MissingField("name"));
        }
        if update.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
            return Err(ProductError::MissingField("description"));
        }
        if let Some(price) = update.price.filter(|p| *p < 0) {
            return Err(ProductError::InvalidPrice(price));
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(images) = update.images {
            self.staging_views = staging_views_for(&images);
            self.images = images;
        }
        if let Some(days) = update.days_to_create {
            self.days_to_create = days.max(1);
        }
        if let Some(complexity) = update.complexity {
            self.complexity = complexity;
        }
        if let Some(materials) = update.materials {
            self.materials = materials;
        }
        Ok(())
    }
}

pub fn staging_views_for(images: &[String]) -> Vec<String> {
    if images.is_empty() {
        Vec::new()
    } else {
        STAGING_VIEWS.iter().map(|v| v.to_string()).collect()
    }
}

/// Product-related errors
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(i64),
}
