//! OCR collaborator boundary.
//!
//! The recognition engine itself is out of scope: it is a black box that
//! accepts an image and returns recognized text plus confidence data.
//! This module defines that contract and a shared handle that owns one
//! lazily-created engine instance.

#[cfg(feature = "native")]
mod pure_engine;
mod shared;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;
pub use shared::SharedEngine;

use image::DynamicImage;

use crate::error::OcrError;

/// Output of one recognition call.
#[derive(Debug, Clone)]
pub struct RecognizedText {
    /// Recognized text, one line per detected region, in reading order.
    pub text: String,

    /// Mean recognition confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Engine-side processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Contract for the external OCR engine.
pub trait OcrEngine {
    /// Recognize text in an image.
    fn recognize(&self, image: &DynamicImage) -> Result<RecognizedText, OcrError>;
}
