use std::sync::Arc;

use tracing::warn;

use crate::config::OcrConfig;
use crate::ocr::{encode_png, normalize_text, prepare_for_recognition, TextRecognizer};

/// The image-to-text adapter.
///
/// Decodes the uploaded bytes, preprocesses, runs recognition, and
/// normalizes the output. This is the sole boundary that converts
/// low-level faults (undecodable image, engine failure, timeout) into
/// the `None` contract; callers above it never see an error value, only
/// absent-vs-present text.
#[derive(Clone)]
pub struct TextExtractor {
    recognizer: Arc<dyn TextRecognizer>,
    config: OcrConfig,
}

impl TextExtractor {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, config: OcrConfig) -> Self {
        Self { recognizer, config }
    }

    pub fn is_available(&self) -> bool {
        self.recognizer.is_available()
    }

    /// Extract normalized text from raw image bytes.
    ///
    /// Returns `None` when the image cannot be decoded, the engine
    /// fails, or the normalized output is empty. An empty string is
    /// never returned.
    pub async fn extract(&self, image_bytes: &[u8]) -> Option<String> {
        let img = match image::load_from_memory(image_bytes) {
            Ok(img) => img,
            Err(e) => {
                warn!(error = %e, "Failed to decode uploaded image");
                return None;
            }
        };

        let prepared = prepare_for_recognition(img, &self.config);
        let png = match encode_png(&prepared) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to encode preprocessed image");
                return None;
            }
        };

        let raw = match self.recognizer.recognize(&png).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Text recognition failed");
                return None;
            }
        };

        let cleaned = normalize_text(&raw);
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PapyrError, Result};
    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedRecognizer {
        output: Result<String>,
        calls: AtomicUsize,
    }

    impl FixedRecognizer {
        fn ok(text: &str) -> Self {
            Self {
                output: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                output: Err(PapyrError::Extraction("engine crashed".to_string())),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextRecognizer for FixedRecognizer {
        async fn recognize(&self, _image_png: &[u8]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.output {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(PapyrError::Extraction(e.to_string())),
            }
        }
    }

    fn test_config() -> OcrConfig {
        OcrConfig {
            languages: "eng".to_string(),
            tessdata_path: None,
            page_seg_mode: 6,
            timeout_secs: 60,
            upscale_factor: 2,
            binarize_threshold: 150,
        }
    }

    fn test_png() -> Vec<u8> {
        let img = DynamicImage::new_luma8(40, 30);
        let mut output = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
            .unwrap();
        output
    }

    #[tokio::test]
    async fn test_undecodable_input_returns_none_without_engine_call() {
        let recognizer = Arc::new(FixedRecognizer::ok("should not be reached"));
        let extractor = TextExtractor::new(recognizer.clone(), test_config());

        assert!(extractor.extract(&[]).await.is_none());
        assert!(extractor.extract(&[0, 1, 2, 3]).await.is_none());
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_engine_failure_returns_none() {
        let extractor = TextExtractor::new(Arc::new(FixedRecognizer::failing()), test_config());
        assert!(extractor.extract(&test_png()).await.is_none());
    }

    #[tokio::test]
    async fn test_blank_engine_output_returns_none() {
        let extractor = TextExtractor::new(Arc::new(FixedRecognizer::ok("  \n\x0c ")), test_config());
        let result = extractor.extract(&test_png()).await;
        assert_eq!(result, None, "whitespace-only output must be absent, not empty");
    }

    #[tokio::test]
    async fn test_output_is_normalized() {
        let extractor =
            TextExtractor::new(Arc::new(FixedRecognizer::ok("  Hello\x0c\n\nworld  ")), test_config());
        assert_eq!(
            extractor.extract(&test_png()).await,
            Some("Hello world".to_string())
        );
    }
}
