//! Configuration structures for the scanning pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::RelotError;

/// Main configuration for the relot pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelotConfig {
    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Receipt extraction configuration.
    pub extraction: ExtractionConfig,

    /// Term lists used by the classifier and scorer.
    pub vocabulary: Vocabulary,
}

impl Default for RelotConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            extraction: ExtractionConfig::default(),
            vocabulary: Vocabulary::default(),
        }
    }
}

/// OCR engine configuration (native `pure-onnx-ocr` adapter).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens in recognized text instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

/// Thresholds for receipt field extraction.
///
/// Score bonus values are not configurable: they are the scoring algorithm
/// itself, not tuning knobs. Everything gated on a bound lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum score a name candidate must reach to be accepted.
    pub min_name_score: i32,

    /// Lines shorter than this after cleanup are never candidates.
    pub min_line_len: usize,

    /// Lines longer than this after cleanup are never candidates.
    pub max_line_len: usize,

    /// Minimum length for a structurally plausible product name.
    pub min_name_len: usize,

    /// Minimum letter-to-character ratio for a plausible product name.
    pub min_letter_ratio: f32,

    /// Accepted names are truncated to this many characters.
    pub max_name_len: usize,

    /// Prices at or above this are treated as OCR misreads and discarded.
    pub max_price: Decimal,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_name_score: 50,
            min_line_len: 12,
            max_line_len: 120,
            min_name_len: 15,
            min_letter_ratio: 0.6,
            max_name_len: 100,
            max_price: Decimal::from(5000),
        }
    }
}

/// Term lists for line classification and candidate scoring.
///
/// Immutable at runtime. Brand, product, and chrome terms are stored
/// lowercase (matching is case-insensitive substring); region codes are
/// stored uppercase and matched per whitespace token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Known brand names. A hit is a strong product-name signal.
    pub brands: Vec<String>,

    /// Product-indicator terms: categories, materials, size words.
    pub product_terms: Vec<String>,

    /// Two-letter region codes used for address detection.
    pub region_codes: Vec<String>,

    /// Storefront chrome strings; any line containing one is noise.
    pub chrome: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            brands: to_strings(&[
                "nike", "adidas", "new balance", "cole haan", "levi's", "levis",
                "ralph lauren", "tommy hilfiger", "calvin klein", "carhartt",
                "patagonia", "north face", "columbia", "under armour", "puma",
                "reebok", "asics", "vans", "converse", "timberland", "dr. martens",
                "lululemon", "champion", "uniqlo", "brooks", "saucony", "hoka",
                "birkenstock", "clarks", "sperry", "dickies", "wrangler", "coach",
                "michael kors", "kate spade", "fossil", "casio", "seiko", "sony",
                "bose", "jbl", "lego", "nintendo", "funko",
            ]),
            product_terms: to_strings(&[
                "sneaker", "shoe", "boot", "sandal", "loafer", "jacket", "hoodie",
                "sweater", "sweatshirt", "shirt", "tee", "jeans", "denim", "pants",
                "shorts", "dress", "skirt", "coat", "vest", "leather", "suede",
                "wool", "cotton", "fleece", "canvas", "backpack", "wallet", "watch",
                "sunglasses", "beanie", "scarf", "gloves", "belt", "socks", "men's",
                "mens", "women's", "womens", "kids", "youth", "vintage", "size",
            ]),
            region_codes: to_strings(&[
                "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI",
                "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI",
                "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC",
                "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
                "VT", "VA", "WA", "WV", "WI", "WY", "DC",
            ]),
            chrome: to_strings(&[
                "home", "menu", "search", "checkout", "cart", "sign in",
                "sign out", "log in", "log out", "your account", "wish list",
                "wishlist", "buy again", "buy it again", "your orders",
                "order history", "customer service", "help center",
                "notifications", "back to top", "see all", "view all",
                "thank you",
            ]),
        }
    }
}

fn to_strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl RelotConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| RelotError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::error::Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| RelotError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roundtrip() {
        let config = RelotConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: RelotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.extraction.min_name_score, 50);
        assert_eq!(back.extraction.max_price, Decimal::from(5000));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: RelotConfig =
            serde_json::from_str(r#"{"extraction": {"min_name_score": 70}}"#).unwrap();
        assert_eq!(config.extraction.min_name_score, 70);
        assert_eq!(config.extraction.max_line_len, 120);
        assert!(!config.vocabulary.brands.is_empty());
    }
}
