//! Quantity extraction from receipt text.
//!
//! Quantity phrasings are mutually exclusive statements of the same fact,
//! so the first match wins. Pattern priority is fixed and observable:
//! a labeled `Qty:` beats a labeled `Quantity:`, which beats an `N @ $`
//! unit-price breakdown, regardless of where each appears in the document.

use super::patterns::{QTY_AT_PRICE, QTY_LABEL, QUANTITY_LABEL};
use super::{ExtractionMatch, FieldExtractor};

/// Quantity field extractor.
pub struct QuantityExtractor;

impl QuantityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QuantityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for QuantityExtractor {
    type Output = ExtractionMatch<u32>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for pattern in [&*QTY_LABEL, &*QUANTITY_LABEL, &*QTY_AT_PRICE] {
            for caps in pattern.captures_iter(text) {
                if let Ok(value) = caps[1].parse::<u32>() {
                    let full_match = caps.get(0).unwrap();
                    results.push(
                        ExtractionMatch::new(value, full_match.as_str())
                            .with_position(full_match.start(), full_match.end()),
                    );
                }
            }
        }

        results
    }
}

/// Extract the quantity: first match in pattern-priority order, floored
/// at 1 even when the matched value is zero.
pub fn extract_quantity(text: &str) -> u32 {
    QuantityExtractor::new()
        .extract(text)
        .map(|m| m.value.max(1))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_pattern() {
        assert_eq!(extract_quantity("Qty: 3"), 3);
        assert_eq!(extract_quantity("qty 4"), 4);
        assert_eq!(extract_quantity("Quantity: 5"), 5);
        assert_eq!(extract_quantity("2 @ $24.99"), 2);
    }

    #[test]
    fn test_default_and_floor() {
        assert_eq!(extract_quantity("no quantity anywhere"), 1);
        assert_eq!(extract_quantity("Qty: 0"), 1);
    }

    #[test]
    fn test_pattern_priority_beats_document_order() {
        // The unit-price breakdown appears first in the text, but the
        // labeled Qty pattern has higher priority.
        let text = "3 @ $5.00 bundle pricing\nQty: 7";
        assert_eq!(extract_quantity(text), 7);
    }

    #[test]
    fn test_first_match_within_a_pattern() {
        assert_eq!(extract_quantity("Qty: 2 and later Qty: 9"), 2);
    }
}
