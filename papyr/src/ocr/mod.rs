//! OCR (Optical Character Recognition) Module
//!
//! Image-to-text pipeline for the Papyr service: preprocess an uploaded
//! image, run it through Tesseract, and clean the raw engine output into
//! a normalized string.
//!
//! # Architecture
//!
//! - [`normalize_text`] strips control characters and collapses whitespace
//!   in raw engine output.
//! - [`prepare_for_recognition`] transforms a decoded bitmap into the
//!   two-tone form Tesseract reads best.
//! - [`TextRecognizer`] is the engine capability trait;
//!   [`TesseractRecognizer`] implements it via leptess.
//! - [`TextExtractor`] is the adapter tying the three together. It is the
//!   sole boundary that converts low-level faults into `None`.
//!
//! # Configuration
//!
//! Behavior is controlled via `OcrConfig` (see `config.rs`):
//! - `languages`: comma-separated ISO 639-2 language codes
//! - `tessdata_path`: Tesseract data directory override
//! - `page_seg_mode`: Tesseract PSM (default 6, uniform text block)
//! - `timeout_secs`: per-recognition timeout
//! - `upscale_factor` / `binarize_threshold`: preprocessing knobs

mod engine;
mod extract;
mod normalize;
mod preprocess;

pub use engine::{TesseractRecognizer, TextRecognizer};
pub use extract::TextExtractor;
pub use normalize::normalize_text;
pub use preprocess::{encode_png, prepare_for_recognition};
