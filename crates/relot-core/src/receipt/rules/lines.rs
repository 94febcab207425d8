//! Line normalization for raw OCR output.

/// Split raw OCR text into trimmed, non-empty lines, preserving order.
///
/// A line's index in the returned sequence divided by the sequence length
/// is its document-position ratio, a weak structural signal used by the
/// scorer.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
