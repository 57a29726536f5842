use serde::{Deserialize, Serialize};
use std::fmt;

/// Days of work the suggested range is normalized against.
const BASELINE_DAYS: f64 = 7.0;

/// Half-width of the suggested band around the adjusted price.
const BAND: f64 = 0.10;

/// Subjective difficulty of a piece
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl Complexity {
    pub fn multiplier(self) -> f64 {
        match self {
            Complexity::High => 1.5,
            Complexity::Medium => 1.0,
            Complexity::Low => 0.8,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Complexity::Low => "Low",
            Complexity::Medium => "Medium",
            Complexity::High => "High",
        };
        f.write_str(s)
    }
}

/// Raw cost inputs of the price calculator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    pub material_cost: f64,
    pub labor_hours: f64,
    pub hourly_rate: f64,

    /// Overhead on top of direct cost, in percent
    pub overhead_percentage: f64,

    /// Profit on top of total cost, in percent
    pub profit_margin: f64,

    pub complexity: Complexity,
    pub days_to_create: u32,
}

/// Suggested price and its display band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub base_price: i64,
    pub suggested_min: i64,
    pub suggested_max: i64,
    pub suggested: i64,
}

/// Where a manually entered price falls relative to the suggested band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceCheck {
    BelowRange,
    WithinRange,
    AboveRange,
}

/// Round half up, so `2.5 -> 3` and `-2.5 -> -2`.
fn round_half_up(value: f64) -> i64 {
    // Compare the fraction instead of adding 0.5, which itself rounds.
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Cost-plus price: labor and materials, then overhead, then margin.
///
/// Inputs are not validated. Zero or negative values simply propagate into
/// the result; coercing malformed input is the caller's job.
pub fn compute_base_price(input: &PricingInput) -> i64 {
    let labor_cost = input.labor_hours * input.hourly_rate;
    let direct_cost = input.material_cost + labor_cost;
    let overhead_cost = direct_cost * (input.overhead_percentage / 100.0);
    let total_cost = direct_cost + overhead_cost;
    let final_price = total_cost + total_cost * (input.profit_margin / 100.0);

    round_half_up(final_price)
}

/// Scale the base price by complexity and by days of work against a one-week
/// baseline, then put a ±10% band around it.
///
/// `days_to_create` has no upper bound; prices grow linearly with it. Zero days
/// is read as one day.
pub fn compute_suggested_range(
    base_price: i64,
    complexity: Complexity,
    days_to_create: u32,
) -> PricingResult {
    let days = days_to_create.max(1) as f64;
    let adjusted = base_price as f64 * complexity.multiplier() * (days / BASELINE_DAYS);

    PricingResult {
        base_price,
        suggested_min: round_half_up(adjusted * (1.0 - BAND)),
        suggested_max: round_half_up(adjusted * (1.0 + BAND)),
        suggested: round_half_up(adjusted),
    }
}

/// Defaults the calculator starts from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    #[serde(default)]
    pub material_cost: f64,

    #[serde(default)]
    pub labor_hours: f64,

    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,

    #[serde(default = "default_overhead")]
    pub overhead_percentage: f64,

    #[serde(default = "default_margin")]
    pub profit_margin: f64,

    #[serde(default)]
    pub complexity: Complexity,

    #[serde(default = "default_days")]
    pub days_to_create: u32,
}

fn default_hourly_rate() -> f64 { 100.0 }
fn default_overhead() -> f64 { 20.0 }
fn default_margin() -> f64 { 30.0 }
fn default_days() -> u32 { 1 }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            material_cost: 0.0,
            labor_hours: 0.0,
            hourly_rate: default_hourly_rate(),
            overhead_percentage: default_overhead(),
            profit_margin: default_margin(),
            complexity: Complexity::default(),
            days_to_create: default_days(),
        }
    }
}

/// Stateless valuation engine; holds only the calculator defaults.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: PricingConfig,
}

impl ValuationEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// A fresh calculator form filled with the configured defaults
    pub fn default_input(&self) -> PricingInput {
        PricingInput {
            material_cost: self.config.material_cost,
            labor_hours: self.config.labor_hours,
            hourly_rate: self.config.hourly_rate,
            overhead_percentage: self.config.overhead_percentage,
            profit_margin: self.config.profit_margin,
            complexity: self.config.complexity,
            days_to_create: self.config.days_to_create,
        }
    }

    pub fn quote(&self, input: &PricingInput) -> PricingResult {
        let base_price = compute_base_price(input);
        compute_suggested_range(base_price, input.complexity, input.days_to_create)
    }

    pub fn check_price(&self, price: i64, range: &PricingResult) -> PriceCheck {
        if price < range.suggested_min {
            PriceCheck::BelowRange
        } else if price > range.suggested_max {
            PriceCheck::AboveRange
        } else {
            PriceCheck::WithinRange
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(material: f64, hours: f64, rate: f64, overhead: f64, margin: f64) -> PricingInput {
        PricingInput {
            material_cost: material,
            labor_hours: hours,
            hourly_rate: rate,
            overhead_percentage: overhead,
            profit_margin: margin,
            complexity: Complexity::Medium,
            days_to_create: 7,
        }
    }

    #[test]
    fn test_zero_cost_gives_zero_price() {
        assert_eq!(compute_base_price(&input(0.0, 0.0, 100.0, 20.0, 30.0)), 0);
    }

    #[test]
    fn test_cost_plus_price() {
        // direct 2000, overhead 400, total 2400, margin 720
        assert_eq!(compute_base_price(&input(1000.0, 10.0, 100.0, 20.0, 30.0)), 3120);
    }

    #[test]
    fn test_negative_inputs_propagate() {
        assert_eq!(compute_base_price(&input(-100.0, 0.0, 100.0, 0.0, 0.0)), -100);
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(compute_base_price(&input(2.5, 0.0, 0.0, 0.0, 0.0)), 3);
        assert_eq!(compute_base_price(&input(-2.5, 0.0, 0.0, 0.0, 0.0)), -2);
        assert_eq!(compute_base_price(&input(2.49, 0.0, 0.0, 0.0, 0.0)), 2);
    }

    #[test]
    fn test_rounding_at_float_edges() {
        // Largest double below 0.5
        assert_eq!(compute_base_price(&input(0.49999999999999994, 0.0, 0.0, 0.0, 0.0)), 0);
        // 2^52 + 1 has no fractional bits left
        assert_eq!(
            compute_base_price(&input(4503599627370497.0, 0.0, 0.0, 0.0, 0.0)),
            4503599627370497
        );
    }

    #[test]
    fn test_suggested_range_medium_one_week() {
        let range = compute_suggested_range(3120, Complexity::Medium, 7);
        assert_eq!(range.suggested_min, 2808);
        assert_eq!(range.suggested_max, 3432);
        assert_eq!(range.suggested, 3120);
        assert_eq!(range.base_price, 3120);
    }

    #[test]
    fn test_suggested_range_high_two_weeks() {
        let range = compute_suggested_range(3120, Complexity::High, 14);
        assert_eq!(range.suggested_min, 8424);
        assert_eq!(range.suggested_max, 10296);
        assert_eq!(range.suggested, 9360);
    }

    #[test]
    fn test_low_never_exceeds_medium() {
        for base in [0, 1, 99, 3120, 250_000] {
            for days in [1, 3, 7, 30] {
                let low = compute_suggested_range(base, Complexity::Low, days);
                let medium = compute_suggested_range(base, Complexity::Medium, days);
                assert!(low.suggested <= medium.suggested);
                assert!(low.suggested_min <= medium.suggested_min);
                assert!(low.suggested_max <= medium.suggested_max);
            }
        }
    }

    #[test]
    fn test_zero_days_reads_as_one() {
        assert_eq!(
            compute_suggested_range(700, Complexity::Medium, 0),
            compute_suggested_range(700, Complexity::Medium, 1)
        );
    }

    #[test]
    fn test_days_scale_without_bound() {
        let year = compute_suggested_range(700, Complexity::Medium, 365);
        assert_eq!(year.suggested, 36500);
    }

    #[test]
    fn test_monotonic_in_each_input() {
        let base = input(500.0, 4.0, 80.0, 10.0, 25.0);
        let before = compute_base_price(&base);
        let bumps: [fn(&mut PricingInput); 5] = [
            |i| i.material_cost += 37.0,
            |i| i.labor_hours += 1.5,
            |i| i.hourly_rate += 12.0,
            |i| i.overhead_percentage += 5.0,
            |i| i.profit_margin += 5.0,
        ];
        for bump in bumps {
            let mut bumped = base;
            bump(&mut bumped);
            assert!(compute_base_price(&bumped) >= before);
        }
    }

    #[test]
    fn test_idempotent() {
        let i = input(1000.0, 10.0, 100.0, 20.0, 30.0);
        assert_eq!(compute_base_price(&i), compute_base_price(&i));
        assert_eq!(
            compute_suggested_range(3120, Complexity::Low, 5),
            compute_suggested_range(3120, Complexity::Low, 5)
        );
    }

    #[test]
    fn test_engine_quote_uses_defaults() {
        let engine = ValuationEngine::default();
        let mut form = engine.default_input();
        assert_eq!(form.hourly_rate, 100.0);
        assert_eq!(form.days_to_create, 1);

        form.material_cost = 1000.0;
        form.labor_hours = 10.0;
        form.days_to_create = 7;
        let quote = engine.quote(&form);
        assert_eq!(quote.suggested, 3120);
    }

    #[test]
    fn test_check_price() {
        let engine = ValuationEngine::default();
        let range = compute_suggested_range(3120, Complexity::Medium, 7);
        assert_eq!(engine.check_price(2000, &range), PriceCheck::BelowRange);
        assert_eq!(engine.check_price(2808, &range), PriceCheck::WithinRange);
        assert_eq!(engine.check_price(3432, &range), PriceCheck::WithinRange);
        assert_eq!(engine.check_price(5000, &range), PriceCheck::AboveRange);
    }
}
