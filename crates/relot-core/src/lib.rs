//! Core library for resale receipt scanning.
//!
//! This crate provides:
//! - An OCR collaborator boundary with a shared, lazily-initialized engine handle
//! - Heuristic receipt parsing: product-name candidate scoring plus price and
//!   quantity extraction
//! - A scan orchestrator that turns a receipt screenshot into a [`ScanResult`]

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;
pub mod scanner;

pub use error::{OcrError, RelotError, Result};
pub use models::config::{ExtractionConfig, OcrConfig, RelotConfig, Vocabulary};
pub use models::receipt::{ScanResult, UNNAMED_ITEM};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use ocr::{OcrEngine, RecognizedText, SharedEngine};
pub use receipt::{HeuristicParser, ParsedReceipt, ReceiptParser};
pub use scanner::{ProgressObserver, ReceiptScanner};
