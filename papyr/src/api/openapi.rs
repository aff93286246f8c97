use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Papyr OCR API",
        version = "1.0.0",
        description = "Extract text from uploaded images and PDFs via Tesseract OCR.",
    ),
    paths(
        handlers::health::root,
        handlers::health::health_check,
        handlers::ocr::ocr_image,
        handlers::ocr::ocr_pdf,
    ),
    components(schemas(
        dto::ImageOcrResponse,
        dto::PageText,
        dto::PdfOcrResponse,
        dto::ErrorDetail,
        dto::LivenessResponse,
        handlers::health::HealthData,
        handlers::health::EngineStatus,
    )),
    tags(
        (name = "health", description = "Liveness and component status"),
        (name = "ocr", description = "Text extraction from images and PDFs"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
