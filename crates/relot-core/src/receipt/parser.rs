//! Heuristic receipt parser: raw OCR text to name, cost, and quantity.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::config::{ExtractionConfig, Vocabulary};

use super::rules::{
    clean_line, extract_price, extract_quantity, is_address_line, is_noise_line,
    is_plausible_name, normalize_lines, score_line, select_name, Candidate,
};

/// Result of parsing one receipt's recognized text.
#[derive(Debug, Clone)]
pub struct ParsedReceipt {
    /// Accepted product name, if any candidate cleared the threshold.
    pub name: Option<String>,
    /// Extracted cost (zero when nothing matched).
    pub cost: Decimal,
    /// Extracted quantity (at least 1).
    pub quantity: u32,
    /// Soft warnings for caller-side display.
    pub warnings: Vec<String>,
    /// Parse time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for receipt parsing.
pub trait ReceiptParser {
    /// Parse receipt fields from recognized text. Infallible: absent
    /// fields fall back to defaults, never errors.
    fn parse(&self, text: &str) -> ParsedReceipt;
}

/// Rule-based parser over the classifier, scorer, and field extractors.
pub struct HeuristicParser {
    config: ExtractionConfig,
    vocabulary: Vocabulary,
}

impl HeuristicParser {
    /// Create a parser with default thresholds and vocabulary.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            vocabulary: Vocabulary::default(),
        }
    }

    /// Set extraction thresholds.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the classifier/scorer term lists.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    fn collect_candidates(&self, lines: &[String]) -> Vec<Candidate> {
        let total = lines.len();
        let mut candidates = Vec::new();

        for (index, raw) in lines.iter().enumerate() {
            let line = clean_line(raw);

            // Cheap length gate before the heavier predicates.
            let length = line.chars().count();
            if length < self.config.min_line_len || length > self.config.max_line_len {
                continue;
            }

            if is_address_line(&line, &self.vocabulary)
                || is_noise_line(&line, &self.vocabulary)
                || !is_plausible_name(&line, &self.config)
            {
                continue;
            }

            let score = score_line(&line, index, total, &self.vocabulary);
            debug!("candidate [{}] score {}: {}", index, score, line);
            candidates.push(Candidate {
                text: line,
                score,
                index,
            });
        }

        candidates
    }
}

impl Default for HeuristicParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for HeuristicParser {
    fn parse(&self, text: &str) -> ParsedReceipt {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let lines = normalize_lines(text);
        info!(
            "Parsing receipt text: {} chars, {} lines",
            text.len(),
            lines.len()
        );

        let candidates = self.collect_candidates(&lines);
        let name = select_name(candidates, &self.config);
        if name.is_none() {
            warnings.push("no product name candidate cleared the acceptance threshold".to_string());
        }

        // Field extractors run over the full text, independent of the
        // name pipeline.
        let cost = extract_price(text, &self.config);
        if cost.is_zero() {
            warnings.push("no plausible price found".to_string());
        }
        let quantity = extract_quantity(text);

        ParsedReceipt {
            name,
            cost,
            quantity,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_parse_marketplace_order() {
        let text = r#"
            Jan 12 order confirmation
            Order #112-6633048-1234567
            Cole Haan Men's Grand Crosscourt Sneaker (M)
            Qty: 2
            Total: $89.99
            Ship to: John Smith - CA 90210
            Thank you for shopping
        "#;

        let parser = HeuristicParser::new();
        let result = parser.parse(text);

        assert_eq!(
            result.name.as_deref(),
            Some("Cole Haan Men's Grand Crosscourt Sneaker (M)")
        );
        assert_eq!(result.cost, Decimal::from_str("89.99").unwrap());
        assert_eq!(result.quantity, 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_address_line_never_selected() {
        // Even with no other surviving lines, the address stays excluded.
        let text = "Ship to: John Smith - CA 90210\nQty: 1";
        let result = HeuristicParser::new().parse(text);
        assert_eq!(result.name, None);
    }

    #[test]
    fn test_no_candidate_above_threshold() {
        let text = r#"
            Order #12345
            qwerty zxcvb asdfgh
            Total: $5.00
        "#;
        let result = HeuristicParser::new().parse(text);
        assert_eq!(result.name, None);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("acceptance threshold")));
        assert_eq!(result.cost, Decimal::from_str("5.00").unwrap());
        assert_eq!(result.quantity, 1);
    }

    #[test]
    fn test_empty_text_yields_defaults() {
        let result = HeuristicParser::new().parse("   \n  \n");
        assert_eq!(result.name, None);
        assert_eq!(result.cost, Decimal::ZERO);
        assert_eq!(result.quantity, 1);
    }

    #[test]
    fn test_custom_vocabulary_changes_scoring() {
        let text = "widget frobnicator deluxe assembly\nQty: 1";

        let stock = HeuristicParser::new().parse(text);
        assert_eq!(stock.name, None);

        let mut vocabulary = Vocabulary::default();
        vocabulary.brands.push("frobnicator".to_string());
        let tuned = HeuristicParser::new().with_vocabulary(vocabulary).parse(text);
        assert_eq!(
            tuned.name.as_deref(),
            Some("widget frobnicator deluxe assembly")
        );
    }
}
