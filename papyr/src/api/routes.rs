use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;

/// Headroom for multipart boundary lines and part headers, so a file
/// right at the upload cap still fits inside the body limit.
const MULTIPART_FRAMING_HEADROOM: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.server.static_dir.clone();
    // Axum caps multipart bodies at 2 MB by default; uploads are bounded
    // by the configured limit instead. The limit applies to the whole
    // body, framing included, so it sits above the file cap and the
    // handler's own size check is the one that rejects oversized files.
    let body_limit =
        DefaultBodyLimit::max(state.config.server.max_upload_bytes + MULTIPART_FRAMING_HEADROOM);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/ocr/upload", post(handlers::ocr::ocr_image))
        .route("/ocr/pdf", post(handlers::ocr::ocr_pdf))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
