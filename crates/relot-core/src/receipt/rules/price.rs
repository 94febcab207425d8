//! Price extraction from receipt text.
//!
//! Price phrasings legitimately repeat (subtotal, shipping, total), so the
//! policy keeps the largest matched amount inside the plausibility bounds
//! rather than the first. This is deliberately asymmetric with quantity
//! extraction, which is first-match.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::models::config::ExtractionConfig;

use super::patterns::{PRICE_DOLLAR, PRICE_TOTAL, PRICE_USD};
use super::{ExtractionMatch, FieldExtractor};

/// Price field extractor.
pub struct PriceExtractor;

impl PriceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PriceExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for pattern in [&*PRICE_DOLLAR, &*PRICE_USD, &*PRICE_TOTAL] {
            for caps in pattern.captures_iter(text) {
                if let Some(amount) = parse_amount(&caps[1]) {
                    let full_match = caps.get(0).unwrap();
                    results.push(
                        ExtractionMatch::new(amount, full_match.as_str())
                            .with_position(full_match.start(), full_match.end()),
                    );
                }
            }
        }

        results
    }
}

/// Extract the purchase cost: the largest matched amount strictly inside
/// (0, `max_price`). Yields zero when nothing qualifies.
pub fn extract_price(text: &str, config: &ExtractionConfig) -> Decimal {
    let matches = PriceExtractor::new().extract_all(text);

    let best = matches
        .iter()
        .filter(|m| m.value > Decimal::ZERO && m.value < config.max_price)
        .max_by(|a, b| a.value.cmp(&b.value));

    match best {
        Some(m) => {
            debug!("price {} from {:?}", m.value, m.source);
            m.value
        }
        None => Decimal::ZERO,
    }
}

/// Parse an amount with either decimal separator ("89.99" or "89,99").
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', ".")).ok()
}
