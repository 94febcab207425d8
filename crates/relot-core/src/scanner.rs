//! Scan orchestrator: receipt image to structured fields.

use std::time::Instant;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::models::receipt::{ScanResult, UNNAMED_ITEM};
use crate::ocr::{OcrEngine, SharedEngine};
use crate::receipt::{HeuristicParser, ReceiptParser};

/// Observer for scan progress.
///
/// Called synchronously at the pipeline checkpoints (approximately 10,
/// 30, 80, 100). Percentages are monotonically non-decreasing within one
/// scan; no other ordering is guaranteed.
pub trait ProgressObserver {
    fn progress(&self, percent: u8);
}

impl<F: Fn(u8)> ProgressObserver for F {
    fn progress(&self, percent: u8) {
        self(percent)
    }
}

fn report(observer: Option<&dyn ProgressObserver>, percent: u8) {
    if let Some(observer) = observer {
        observer.progress(percent);
    }
}

/// Sequences OCR recognition and field extraction for one receipt image.
pub struct ReceiptScanner<E> {
    engine: SharedEngine<E>,
    parser: HeuristicParser,
}

impl<E: OcrEngine> ReceiptScanner<E> {
    /// Create a scanner around a shared engine handle, with the default
    /// parser.
    pub fn new(engine: SharedEngine<E>) -> Self {
        Self {
            engine,
            parser: HeuristicParser::new(),
        }
    }

    /// Replace the parser (custom thresholds or vocabulary).
    pub fn with_parser(mut self, parser: HeuristicParser) -> Self {
        self.parser = parser;
        self
    }

    /// Scan one receipt image.
    ///
    /// Never fails: an OCR error comes back as a result with
    /// `success: false` and default field values, so the caller can fall
    /// back to manual entry without special-casing.
    pub fn scan(
        &self,
        image: &DynamicImage,
        observer: Option<&dyn ProgressObserver>,
    ) -> ScanResult {
        let start = Instant::now();
        report(observer, 10);

        let recognized = match self.engine.recognize(image) {
            Ok(recognized) => recognized,
            Err(e) => {
                warn!("OCR failed: {}", e);
                report(observer, 100);
                let mut result = ScanResult::failure(e.to_string());
                result.processing_time_ms = start.elapsed().as_millis() as u64;
                return result;
            }
        };
        debug!(
            "recognition took {}ms engine-side",
            recognized.processing_time_ms
        );
        report(observer, 30);

        let parsed = self.parser.parse(&recognized.text);
        report(observer, 80);

        let result = ScanResult {
            name: parsed
                .name
                .unwrap_or_else(|| UNNAMED_ITEM.to_string()),
            cost: parsed.cost,
            quantity: parsed.quantity,
            raw_text: recognized.text,
            success: true,
            error: None,
            warnings: parsed.warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Scan complete in {}ms (recognition confidence {:.2})",
            result.processing_time_ms, recognized.confidence
        );
        report(observer, 100);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::ocr::RecognizedText;
    use rust_decimal::Decimal;
    use std::cell::RefCell;
    use std::str::FromStr;

    struct StaticEngine(&'static str);

    impl OcrEngine for StaticEngine {
        fn recognize(&self, _image: &DynamicImage) -> Result<RecognizedText, OcrError> {
            Ok(RecognizedText {
                text: self.0.to_string(),
                confidence: 0.9,
                processing_time_ms: 5,
            })
        }
    }

    struct BrokenEngine;

    impl OcrEngine for BrokenEngine {
        fn recognize(&self, _image: &DynamicImage) -> Result<RecognizedText, OcrError> {
            Err(OcrError::Recognition("image unreadable".to_string()))
        }
    }

    fn image() -> DynamicImage {
        DynamicImage::new_rgb8(8, 8)
    }

    #[test]
    fn test_full_scan() {
        let text = "Order placed yesterday\nSold by Resale Partner\nNike Air Force 1 Low White Sneakers (L)\nQty: 2\nTotal: $89.99\nShip to: John Smith - CA 90210\nThank you for shopping";
        let scanner = ReceiptScanner::new(SharedEngine::from_engine(StaticEngine(text)));

        let result = scanner.scan(&image(), None);

        assert!(result.success);
        assert_eq!(result.name, "Nike Air Force 1 Low White Sneakers (L)");
        assert_eq!(result.cost, Decimal::from_str("89.99").unwrap());
        assert_eq!(result.quantity, 2);
        assert_eq!(result.raw_text, text);
    }

    #[test]
    fn test_empty_recognition_yields_defaults() {
        let scanner = ReceiptScanner::new(SharedEngine::from_engine(StaticEngine("   \n  ")));
        let result = scanner.scan(&image(), None);

        assert!(result.success);
        assert_eq!(result.name, UNNAMED_ITEM);
        assert_eq!(result.cost, Decimal::ZERO);
        assert_eq!(result.quantity, 1);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_ocr_failure_is_downgraded() {
        let scanner = ReceiptScanner::new(SharedEngine::from_engine(BrokenEngine));
        let result = scanner.scan(&image(), None);

        assert!(!result.success);
        assert!(result.error.as_deref().unwrap_or("").contains("unreadable"));
        assert_eq!(result.name, UNNAMED_ITEM);
        assert_eq!(result.cost, Decimal::ZERO);
        assert_eq!(result.quantity, 1);
    }

    #[test]
    fn test_progress_checkpoints() {
        let seen = RefCell::new(Vec::new());
        let observer = |percent: u8| seen.borrow_mut().push(percent);

        let scanner = ReceiptScanner::new(SharedEngine::from_engine(StaticEngine("Qty: 2")));
        scanner.scan(&image(), Some(&observer));

        let seen = seen.into_inner();
        assert_eq!(seen, vec![10, 30, 80, 100]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_progress_completes_on_failure() {
        let seen = RefCell::new(Vec::new());
        let observer = |percent: u8| seen.borrow_mut().push(percent);

        let scanner = ReceiptScanner::new(SharedEngine::from_engine(BrokenEngine));
        scanner.scan(&image(), Some(&observer));

        let seen = seen.into_inner();
        assert_eq!(seen.first(), Some(&10));
        assert_eq!(seen.last(), Some(&100));
    }
}
