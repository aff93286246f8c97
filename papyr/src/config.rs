use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Comma-separated ISO 639-2 language codes passed to Tesseract.
    pub languages: String,
    /// Tesseract data directory. When unset, leptess falls back to the
    /// library's compiled-in default (typically /usr/share/tessdata).
    pub tessdata_path: Option<String>,
    /// Tesseract page segmentation mode. 6 = single uniform block of text.
    pub page_seg_mode: u32,
    pub timeout_secs: u64,
    /// Integer upscale factor applied before recognition.
    pub upscale_factor: u32,
    /// Grayscale intensity below which a pixel becomes black.
    pub binarize_threshold: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    /// Rasterization density for PDF pages.
    pub render_dpi: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("PAPYR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PAPYR_PORT", 8000),
                static_dir: env::var("PAPYR_STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
                max_upload_bytes: parse_env_or("PAPYR_MAX_UPLOAD_BYTES", 25 * 1024 * 1024),
            },
            ocr: OcrConfig {
                languages: env::var("OCR_LANGUAGES").unwrap_or_else(|_| "eng".to_string()),
                tessdata_path: env::var("OCR_TESSDATA_PATH").ok(),
                page_seg_mode: parse_env_or("OCR_PAGE_SEG_MODE", 6),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 60),
                upscale_factor: parse_env_or("OCR_UPSCALE_FACTOR", 2),
                binarize_threshold: parse_env_or("OCR_BINARIZE_THRESHOLD", 150),
            },
            pdf: PdfConfig {
                render_dpi: parse_env_or("PDF_RENDER_DPI", 150.0),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
