//! Native OCR engine adapter over `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{OcrEngine, RecognizedText};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX
/// Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl PureOcrEngine {
    /// Create an engine from model files in a directory.
    pub fn from_dir(model_dir: &Path, config: &OcrConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&config.detection_model);
        let rec_path = model_dir.join(&config.recognition_model);
        let dict_path = model_dir.join(&config.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine,
            keep_unk: config.keep_unk,
        })
    }
}

impl OcrEngine for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<RecognizedText, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!(
                "{}x{} image has no pixels",
                width, height
            )));
        }

        let regions = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", regions.len());

        // Flatten to reading order: bucket rows by y, then left to right.
        let mut lines: Vec<(i32, f64, String, f32)> = regions
            .iter()
            .map(|region| {
                let (x, y) = top_left(&region.bounding_box);
                let text = if self.keep_unk {
                    region.text.clone()
                } else {
                    region.text.replace("[UNK]", " ")
                };
                ((y / 20.0) as i32, x, text, region.confidence)
            })
            .collect();
        lines.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        });

        let confidence = if lines.is_empty() {
            0.0
        } else {
            lines.iter().map(|l| l.3).sum::<f32>() / lines.len() as f32
        };
        let text = lines
            .iter()
            .map(|l| l.2.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "OCR complete: {} regions in {}ms",
            lines.len(),
            processing_time_ms
        );

        Ok(RecognizedText {
            text,
            confidence,
            processing_time_ms,
        })
    }
}

/// Top-left corner of a region's bounding polygon.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for coord in polygon.exterior().coords() {
        min_x = min_x.min(coord.x);
        min_y = min_y.min(coord.y);
    }
    (min_x, min_y)
}
