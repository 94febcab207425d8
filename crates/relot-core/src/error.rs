//! Error types for the relot-core library.

use thiserror::Error;

/// Main error type for the relot library.
#[derive(Error, Debug)]
pub enum RelotError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the OCR collaborator boundary.
///
/// These never escape the scan orchestrator: it downgrades them into a
/// failure [`ScanResult`](crate::ScanResult) so callers can fall back to
/// manual entry.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the relot library.
pub type Result<T> = std::result::Result<T, RelotError>;
