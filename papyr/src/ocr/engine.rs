use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use leptess::{LepTess, Variable};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{PapyrError, Result};

/// Capability interface for the text recognition engine.
///
/// Takes a PNG-encoded image and returns the engine's raw text output,
/// uncleaned. Implementations must be safe to share across requests.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image_png: &[u8]) -> Result<String>;

    fn is_available(&self) -> bool {
        true
    }
}

enum Engine {
    Tesseract { inner: Arc<Mutex<LepTess>> },
    Unavailable { reason: String },
}

/// Tesseract-backed recognizer via leptess.
///
/// Recognition uses the LSTM engine (the Tesseract 4+ default) with the
/// configured page segmentation mode. The underlying API is not
/// thread-safe, so calls serialize on a mutex and run on the blocking
/// pool under a timeout.
pub struct TesseractRecognizer {
    engine: Engine,
    timeout_secs: u64,
}

fn init_tesseract(config: &OcrConfig) -> std::result::Result<LepTess, String> {
    let mut lt =
        LepTess::new(config.tessdata_path.as_deref(), &config.languages).map_err(|e| e.to_string())?;
    lt.set_variable(Variable::TesseditPagesegMode, &config.page_seg_mode.to_string())
        .map_err(|e| e.to_string())?;
    Ok(lt)
}

impl TesseractRecognizer {
    pub fn new(config: &OcrConfig) -> Self {
        let engine = match init_tesseract(config) {
            Ok(lt) => {
                info!(
                    languages = %config.languages,
                    page_seg_mode = config.page_seg_mode,
                    "Tesseract OCR initialized"
                );
                Engine::Tesseract {
                    inner: Arc::new(Mutex::new(lt)),
                }
            }
            Err(e) => {
                let reason = format!("Tesseract not available: {e}");
                warn!("{}", reason);
                Engine::Unavailable { reason }
            }
        };

        Self {
            engine,
            timeout_secs: config.timeout_secs,
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image_png: &[u8]) -> Result<String> {
        match &self.engine {
            Engine::Tesseract { inner } => {
                let bytes = image_png.to_vec();
                let tesseract = Arc::clone(inner);

                let task = tokio::task::spawn_blocking(move || {
                    let mut lt = tesseract.blocking_lock();
                    lt.set_image_from_mem(&bytes)
                        .map_err(|e| PapyrError::Extraction(format!("Failed to set image: {e}")))?;
                    lt.get_utf8_text()
                        .map_err(|e| PapyrError::Extraction(format!("Failed to extract text: {e}")))
                });

                let text = tokio::time::timeout(Duration::from_secs(self.timeout_secs), task)
                    .await
                    .map_err(|_| {
                        PapyrError::Extraction(format!(
                            "OCR operation timed out after {} seconds",
                            self.timeout_secs
                        ))
                    })?
                    .map_err(|e| PapyrError::Extraction(format!("OCR task panicked: {e}")))??;

                Ok(text)
            }
            Engine::Unavailable { reason } => Err(PapyrError::OcrUnavailable(reason.clone())),
        }
    }

    fn is_available(&self) -> bool {
        !matches!(self.engine, Engine::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_constructor_degrades_gracefully() {
        // Must never panic, whether or not Tesseract is installed.
        let recognizer = TesseractRecognizer::new(&test_config());
        let _ = recognizer.is_available();
    }

    #[tokio::test]
    async fn test_unavailable_engine_returns_error() {
        let recognizer = TesseractRecognizer {
            engine: Engine::Unavailable {
                reason: "test unavailable".to_string(),
            },
            timeout_secs: 5,
        };

        assert!(!recognizer.is_available());
        let result = recognizer.recognize(&[]).await;
        assert!(matches!(result, Err(PapyrError::OcrUnavailable(_))));
    }

    #[test]
    fn test_bogus_tessdata_path_is_unavailable() {
        let config = OcrConfig {
            tessdata_path: Some("/nonexistent/tessdata".to_string()),
            ..test_config()
        };
        let recognizer = TesseractRecognizer::new(&config);
        assert!(!recognizer.is_available());
    }
}
