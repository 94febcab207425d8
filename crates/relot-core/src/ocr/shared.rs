//! Shared, lazily-initialized OCR engine handle.

use std::sync::{Mutex, PoisonError};

use image::DynamicImage;
use tracing::debug;

use crate::error::OcrError;

use super::{OcrEngine, RecognizedText};

/// An explicitly-owned slot for one engine instance.
///
/// The engine is created on first use by the supplied initializer and
/// reused for every later call. Access is serialized through the slot's
/// mutex: the underlying engines are not assumed to support concurrent
/// recognition, and nothing in the pipeline stages provides that
/// serialization, so it is enforced here.
pub struct SharedEngine<E> {
    slot: Mutex<Option<E>>,
    init: Box<dyn Fn() -> Result<E, OcrError> + Send + Sync>,
}

impl<E: OcrEngine> SharedEngine<E> {
    /// Create an empty handle; the engine is built on first `recognize`.
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Result<E, OcrError> + Send + Sync + 'static,
    {
        Self {
            slot: Mutex::new(None),
            init: Box::new(init),
        }
    }

    /// Wrap an already-constructed engine (used by tests and callers
    /// that build eagerly).
    pub fn from_engine(engine: E) -> Self {
        Self {
            slot: Mutex::new(Some(engine)),
            init: Box::new(|| Err(OcrError::ModelLoad("engine slot was emptied".to_string()))),
        }
    }

    /// Recognize text, creating the engine first if needed.
    pub fn recognize(&self, image: &DynamicImage) -> Result<RecognizedText, OcrError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        let engine = match slot.take() {
            Some(engine) => engine,
            None => {
                debug!("initializing OCR engine on first use");
                (self.init)()?
            }
        };

        let result = engine.recognize(image);
        *slot = Some(engine);
        result
    }

    /// Whether the engine has been created yet.
    pub fn is_initialized(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingEngine;

    impl OcrEngine for CountingEngine {
        fn recognize(&self, _image: &DynamicImage) -> Result<RecognizedText, OcrError> {
            Ok(RecognizedText {
                text: "line".to_string(),
                confidence: 1.0,
                processing_time_ms: 0,
            })
        }
    }

    #[test]
    fn test_initializes_once_and_reuses() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let shared = SharedEngine::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(CountingEngine)
        });

        assert!(!shared.is_initialized());

        let image = DynamicImage::new_rgb8(4, 4);
        for _ in 0..3 {
            shared.recognize(&image).unwrap();
        }

        assert!(shared.is_initialized());
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_init_is_retried_next_call() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let shared = SharedEngine::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(OcrError::ModelLoad("missing model file".to_string()))
            } else {
                Ok(CountingEngine)
            }
        });

        let image = DynamicImage::new_rgb8(4, 4);
        assert!(shared.recognize(&image).is_err());
        assert!(!shared.is_initialized());
        assert!(shared.recognize(&image).is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_from_engine_is_already_initialized() {
        let shared = SharedEngine::from_engine(CountingEngine);
        assert!(shared.is_initialized());
        let image = DynamicImage::new_rgb8(4, 4);
        assert!(shared.recognize(&image).is_ok());
    }
}
