//! Line classification: cleanup pass and exclusion predicates.
//!
//! OCR flattens a storefront screenshot into a stream of lines where the
//! product title sits between navigation chrome, order metadata, and the
//! shipping address. Each predicate here encodes a recurring textual
//! signature of a non-product line; any single match excludes the line
//! from name candidacy. The filter is precision-oriented: false exclusions
//! only cost one candidate, false inclusions pollute scoring.

use crate::models::config::{ExtractionConfig, Vocabulary};

use super::patterns::{
    ATTRIBUTE_LABEL, DISCOUNT, LEADING_DATE, LEADING_JUNK, NAME_DASH_REGION, ORDER_METADATA,
    SELLER_ATTRIBUTION, SHIP_TO, TRAILING_PIPES, UNIT_PRICE_BREAKDOWN, ZIP_CODE,
};

/// Strip OCR border junk from the start and pipe artifacts from the end.
///
/// Idempotent: cleaning an already-cleaned line is a no-op.
pub fn clean_line(line: &str) -> String {
    let stripped = LEADING_JUNK.replace(line, "");
    let stripped = TRAILING_PIPES.replace(&stripped, "");
    stripped.trim().to_string()
}

/// True if the line looks like part of a shipping address.
pub fn is_address_line(line: &str, vocabulary: &Vocabulary) -> bool {
    if SHIP_TO.is_match(line) || ZIP_CODE.is_match(line) || NAME_DASH_REGION.is_match(line) {
        return true;
    }

    // Standalone two-letter region code anywhere in the line.
    line.split_whitespace().any(|token| {
        let token = token.trim_matches(|c: char| !c.is_ascii_alphanumeric());
        token.len() == 2
            && token.chars().all(|c| c.is_ascii_alphabetic())
            && vocabulary
                .region_codes
                .iter()
                .any(|code| code.eq_ignore_ascii_case(token))
    })
}

/// True if the line is order metadata or storefront chrome.
pub fn is_noise_line(line: &str, vocabulary: &Vocabulary) -> bool {
    if SELLER_ATTRIBUTION.is_match(line)
        || ORDER_METADATA.is_match(line)
        || UNIT_PRICE_BREAKDOWN.is_match(line)
        || DISCOUNT.is_match(line)
        || ATTRIBUTE_LABEL.is_match(line)
        || LEADING_DATE.is_match(line)
    {
        return true;
    }

    let lower = line.to_lowercase();
    vocabulary
        .chrome
        .iter()
        .any(|term| lower.contains(term.as_str()))
}

/// True if the line is structurally shaped like a product name.
pub fn is_plausible_name(line: &str, config: &ExtractionConfig) -> bool {
    let total = line.chars().count();
    if total < config.min_name_len {
        return false;
    }

    if !line.chars().next().is_some_and(char::is_alphabetic) {
        return false;
    }

    let words = line
        .split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .count();
    if words < 2 {
        return false;
    }

    let letters = line.chars().filter(|c| c.is_alphabetic()).count();
    letters as f32 / total as f32 >= config.min_letter_ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::default()
    }

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    #[test]
    fn test_clean_line_strips_junk() {
        assert_eq!(clean_line("|= - Nike Air Max 90 |"), "Nike Air Max 90");
        assert_eq!(clean_line("** $%, Wool Overcoat"), "Wool Overcoat");
        assert_eq!(clean_line("plain line"), "plain line");
    }

    #[test]
    fn test_clean_line_is_idempotent() {
        for raw in ["|= - Nike Air Max 90 |", "text | |", "  # leading", "ok"] {
            let once = clean_line(raw);
            assert_eq!(clean_line(&once), once);
        }
    }

    #[test]
    fn test_address_detection() {
        assert!(is_address_line("Ship to: John Smith", &vocab()));
        assert!(is_address_line("Shipping to 42 Elm Street", &vocab()));
        assert!(is_address_line("Portland OR 97201", &vocab()));
        assert!(is_address_line("Springfield 90210-1234", &vocab()));
        assert!(is_address_line("John Smith - CA", &vocab()));
        assert!(is_address_line("John Smith \u{2014} CA 90210", &vocab()));
        assert!(!is_address_line(
            "Patagonia Better Sweater Fleece Jacket",
            &vocab()
        ));
    }

    #[test]
    fn test_region_code_is_word_bounded() {
        // "or" as a word excludes, "or" inside a word does not
        assert!(is_address_line("Black or Blue colorway", &vocab()));
        assert!(!is_address_line("Leather Oxford Dress Shoes, Brown", &vocab()));
    }

    #[test]
    fn test_noise_detection() {
        assert!(is_noise_line("Sold by Marketplace Deals LLC", &vocab()));
        assert!(is_noise_line("Order #112-6633048", &vocab()));
        assert!(is_noise_line("Tracking number available", &vocab()));
        assert!(is_noise_line("2 @ $24.99 each", &vocab()));
        assert!(is_noise_line("Save 15% with coupon", &vocab()));
        assert!(is_noise_line("Condition: New with box", &vocab()));
        assert!(is_noise_line("12/28/2025 - estimated arrival", &vocab()));
        assert!(is_noise_line("Proceed to checkout", &vocab()));
        assert!(!is_noise_line(
            "Columbia Fleece Pullover Sweater",
            &vocab()
        ));
    }

    #[test]
    fn test_plausible_name_shape() {
        assert!(is_plausible_name(
            "Nike Air Force 1 Low White Sneakers",
            &config()
        ));
        // too short
        assert!(!is_plausible_name("Nike Air", &config()));
        // single long token
        assert!(!is_plausible_name("Supercalifragilistic", &config()));
        // digit-heavy
        assert!(!is_plausible_name("123456 789012 345678", &config()));
        // does not start with a letter
        assert!(!is_plausible_name("1x Wool Winter Overcoat", &config()));
    }

    #[test]
    fn test_classification_is_idempotent_after_cleanup() {
        let raw = "|| Nike Air Force 1 Low White Sneakers |";
        let cleaned = clean_line(raw);
        let verdict = is_plausible_name(&cleaned, &config());
        assert_eq!(is_plausible_name(&clean_line(&cleaned), &config()), verdict);
    }
}
