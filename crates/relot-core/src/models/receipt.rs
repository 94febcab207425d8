//! Receipt scan result model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel name used when no candidate clears the acceptance threshold.
pub const UNNAMED_ITEM: &str = "Unnamed Item";

/// The final output of one receipt scan.
///
/// Handed to the caller unchanged; the core never persists it. Every
/// failure path still yields a valid record, so a caller can always fall
/// back to manual entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Best-guess product name, or [`UNNAMED_ITEM`].
    pub name: String,

    /// Extracted purchase cost. Zero when nothing plausible matched.
    pub cost: Decimal,

    /// Extracted quantity, always at least 1.
    pub quantity: u32,

    /// Full recognized text the fields were extracted from.
    pub raw_text: String,

    /// False only when the OCR collaborator itself failed.
    pub success: bool,

    /// Human-readable OCR error, present when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Soft warnings (e.g. no name candidate accepted).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Total scan time in milliseconds.
    pub processing_time_ms: u64,
}

impl Default for ScanResult {
    fn default() -> Self {
        Self {
            name: UNNAMED_ITEM.to_string(),
            cost: Decimal::ZERO,
            quantity: 1,
            raw_text: String::new(),
            success: true,
            error: None,
            warnings: Vec::new(),
            processing_time_ms: 0,
        }
    }
}

impl ScanResult {
    /// A failure result carrying default field values.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Whether a real product name was extracted (not the sentinel).
    pub fn has_name(&self) -> bool {
        self.name != UNNAMED_ITEM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_keeps_defaults() {
        let result = ScanResult::failure("image unreadable");
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("image unreadable"));
        assert_eq!(result.name, UNNAMED_ITEM);
        assert_eq!(result.cost, Decimal::ZERO);
        assert_eq!(result.quantity, 1);
        assert!(!result.has_name());
    }
}
