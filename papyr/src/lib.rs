pub mod api;
pub mod config;
pub mod error;
pub mod ocr;
pub mod pdf;
