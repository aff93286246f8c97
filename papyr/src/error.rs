use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PapyrError {
    /// Client sent something we cannot work with: wrong content type,
    /// unreadable document, zero pages, missing or oversized upload.
    #[error("{0}")]
    InvalidInput(String),

    /// Extraction ran and produced nothing usable.
    #[error("{0}")]
    Extraction(String),

    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[error("PDF rasterizer unavailable: {0}")]
    RasterizerUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for PapyrError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            PapyrError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PapyrError::Extraction(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            PapyrError::OcrUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            PapyrError::RasterizerUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            PapyrError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({ "detail": detail }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PapyrError>;
