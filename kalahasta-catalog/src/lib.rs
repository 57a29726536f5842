pub mod pricing;
pub mod product;

pub use pricing::{
    compute_base_price, compute_suggested_range, Complexity, PriceCheck, PricingConfig,
    PricingInput, PricingResult, ValuationEngine,
};
pub use product::{Product, ProductDraft, ProductError, ProductUpdate};
