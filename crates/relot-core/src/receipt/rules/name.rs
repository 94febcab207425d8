//! Product-name candidate scoring and selection.
//!
//! Scores are additive sums of independent signal bonuses: no single
//! signal is necessary or sufficient, which keeps the scorer robust to
//! partial matches and OCR noise. Scores are comparative, not
//! probabilities; there is no cap and no normalization.

use crate::models::config::{ExtractionConfig, Vocabulary};

use super::patterns::{CAPITALIZED_WORD, SIZE_PARENTHETICAL, TITLE_CASE_START};

/// Per product-vocabulary term present in the line.
const VOCABULARY_HIT: i32 = 30;
/// Per known-brand term present in the line.
const BRAND_HIT: i32 = 60;
/// Length in [20, 70] characters.
const IDEAL_LENGTH: i32 = 25;
/// Length in [15, 90] characters.
const FAIR_LENGTH: i32 = 10;
/// Word count in [4, 12].
const IDEAL_WORD_COUNT: i32 = 25;
/// Word count of at least 3.
const FAIR_WORD_COUNT: i32 = 10;
/// Starts uppercase-then-lowercase.
const TITLE_CASE: i32 = 15;
/// At least two capitalized words.
const MULTI_CAPITALIZED: i32 = 20;
/// Size qualifier in parentheses.
const SIZE_QUALIFIER: i32 = 30;
/// Document-position ratio in [0.15, 0.55].
const POSITION_SWEET_SPOT: i32 = 15;
/// Document-position ratio below 0.08 or above 0.85.
const POSITION_EDGE_PENALTY: i32 = -25;

/// A line provisionally considered as the product name.
///
/// Candidates are ephemeral: created fresh per extraction call, never
/// persisted.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Cleaned line text.
    pub text: String,
    /// Plausibility score.
    pub score: i32,
    /// Index of the line in the surviving sequence.
    pub index: usize,
}

fn position_ratio(index: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        index as f32 / total as f32
    }
}

/// Score one surviving line against the product-name signals.
pub fn score_line(line: &str, index: usize, total: usize, vocabulary: &Vocabulary) -> i32 {
    let mut score = 0;
    let lower = line.to_lowercase();

    // Vocabulary and brand hits stack per matching term.
    let term_hits = vocabulary
        .product_terms
        .iter()
        .filter(|term| lower.contains(term.as_str()))
        .count();
    score += VOCABULARY_HIT * term_hits as i32;

    let brand_hits = vocabulary
        .brands
        .iter()
        .filter(|brand| lower.contains(brand.as_str()))
        .count();
    score += BRAND_HIT * brand_hits as i32;

    let length = line.chars().count();
    if (20..=70).contains(&length) {
        score += IDEAL_LENGTH;
    } else if (15..=90).contains(&length) {
        score += FAIR_LENGTH;
    }

    let words = line.split_whitespace().count();
    if (4..=12).contains(&words) {
        score += IDEAL_WORD_COUNT;
    } else if words >= 3 {
        score += FAIR_WORD_COUNT;
    }

    if TITLE_CASE_START.is_match(line) {
        score += TITLE_CASE;
    }

    let capitalized = line
        .split_whitespace()
        .filter(|word| CAPITALIZED_WORD.is_match(word))
        .count();
    if capitalized >= 2 {
        score += MULTI_CAPITALIZED;
    }

    if SIZE_PARENTHETICAL.is_match(line) {
        score += SIZE_QUALIFIER;
    }

    let ratio = position_ratio(index, total);
    if (0.15..=0.55).contains(&ratio) {
        score += POSITION_SWEET_SPOT;
    } else if ratio < 0.08 || ratio > 0.85 {
        score += POSITION_EDGE_PENALTY;
    }

    score
}

/// Pick the best-scoring candidate at or above the acceptance threshold.
///
/// The sort is stable, so equal scores keep document order and the
/// earlier line wins: mid-document lines encountered first are the more
/// likely title. The accepted name is truncated and re-trimmed.
pub fn select_name(mut candidates: Vec<Candidate>, config: &ExtractionConfig) -> Option<String> {
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let best = candidates.into_iter().next()?;
    if best.score < config.min_name_score {
        return None;
    }

    let name: String = best.text.chars().take(config.max_name_len).collect();
    Some(name.trim().to_string())
}
