use std::sync::Arc;

use crate::config::Config;
use crate::ocr::{TextExtractor, TextRecognizer};
use crate::pdf::PageRasterizer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: TextExtractor,
    pub rasterizer: Arc<dyn PageRasterizer>,
}

impl AppState {
    pub fn new(
        config: Config,
        recognizer: Arc<dyn TextRecognizer>,
        rasterizer: Arc<dyn PageRasterizer>,
    ) -> Self {
        let config = Arc::new(config);
        let extractor = TextExtractor::new(recognizer, config.ocr.clone());

        Self {
            config,
            extractor,
            rasterizer,
        }
    }
}
