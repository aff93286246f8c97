//! Wire schemas for the OCR endpoints.

use serde::{Deserialize, Serialize};

/// Result of a single-image extraction.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ImageOcrResponse {
    pub filename: String,
    pub content_type: String,
    pub extracted_text: String,
}

/// Text recognized on one PDF page.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PageText {
    /// 1-based page number.
    pub page: u32,
    /// Normalized text; empty when the page had nothing recognizable.
    pub extracted_text: String,
}

/// Result of a whole-document extraction, pages in ascending order.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PdfOcrResponse {
    pub filename: String,
    pub num_pages: u32,
    pub pages: Vec<PageText>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LivenessResponse {
    pub message: String,
}
