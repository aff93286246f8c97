//! OCR upload handlers.
//!
//! Both endpoints accept a multipart form with a `file` field, validate
//! the declared content type before any engine work, and reason purely
//! in terms of absent-vs-present text: the extractor never surfaces its
//! internal failures here.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::dto::{ImageOcrResponse, PageText, PdfOcrResponse};
use crate::api::state::AppState;
use crate::error::{PapyrError, Result};

struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_file_field(multipart: &mut Multipart, max_bytes: usize) -> Result<UploadedFile> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(PapyrError::InvalidInput(format!(
                    "Malformed multipart body: {e}"
                )))
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());

        let bytes = field
            .bytes()
            .await
            .map_err(|e| PapyrError::InvalidInput(format!("Failed to read file: {e}")))?;

        if bytes.len() > max_bytes {
            return Err(PapyrError::InvalidInput(format!(
                "File too large: {} bytes (max {} bytes)",
                bytes.len(),
                max_bytes
            )));
        }

        return Ok(UploadedFile {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(PapyrError::InvalidInput(
        "Missing required 'file' field".to_string(),
    ))
}

/// `POST /ocr/upload`
///
/// Upload an image and extract text from it.
#[utoipa::path(
    post,
    path = "/ocr/upload",
    tag = "ocr",
    request_body(
        content_type = "multipart/form-data",
        content = String,
        description = "Image file in a `file` field"
    ),
    responses(
        (status = 200, description = "Text extracted from the image", body = ImageOcrResponse),
        (status = 400, description = "Upload is not an image", body = crate::api::dto::ErrorDetail),
        (status = 500, description = "No text could be extracted", body = crate::api::dto::ErrorDetail),
    )
)]
pub async fn ocr_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageOcrResponse>> {
    let file = read_file_field(&mut multipart, state.config.server.max_upload_bytes).await?;

    let content_type = file.content_type.unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err(PapyrError::InvalidInput(
            "Invalid file type. Please upload an image.".to_string(),
        ));
    }

    match state.extractor.extract(&file.bytes).await {
        Some(text) => Ok(Json(ImageOcrResponse {
            filename: file.filename,
            content_type,
            extracted_text: text,
        })),
        None => Err(PapyrError::Extraction(
            "Failed to extract text from the image.".to_string(),
        )),
    }
}

/// `POST /ocr/pdf`
///
/// Upload a PDF, rasterize each page, and extract text page by page.
/// A page that yields nothing comes back as an empty string; the request
/// only fails outright when every page is empty.
#[utoipa::path(
    post,
    path = "/ocr/pdf",
    tag = "ocr",
    request_body(
        content_type = "multipart/form-data",
        content = String,
        description = "PDF file in a `file` field"
    ),
    responses(
        (status = 200, description = "Per-page extraction results", body = PdfOcrResponse),
        (status = 400, description = "Not a PDF, unreadable, or zero pages", body = crate::api::dto::ErrorDetail),
        (status = 500, description = "Every page came back empty", body = crate::api::dto::ErrorDetail),
    )
)]
pub async fn ocr_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PdfOcrResponse>> {
    let file = read_file_field(&mut multipart, state.config.server.max_upload_bytes).await?;

    let is_pdf = file.content_type.as_deref() == Some("application/pdf")
        || file.filename.to_lowercase().ends_with(".pdf");
    if !is_pdf {
        return Err(PapyrError::InvalidInput(
            "Invalid file type. Please upload a PDF file.".to_string(),
        ));
    }

    // Unreadable documents and zero-page documents surface as 400 here.
    let rendered = state.rasterizer.rasterize(&file.bytes).await?;

    let mut pages = Vec::with_capacity(rendered.len());
    for (index, page_png) in rendered.iter().enumerate() {
        let extracted_text = state.extractor.extract(page_png).await.unwrap_or_default();
        pages.push(PageText {
            page: index as u32 + 1,
            extracted_text,
        });
    }

    if pages.iter().all(|p| p.extracted_text.is_empty()) {
        return Err(PapyrError::Extraction(
            "Failed to extract text from all pages.".to_string(),
        ));
    }

    Ok(Json(PdfOcrResponse {
        filename: file.filename,
        num_pages: pages.len() as u32,
        pages,
    }))
}
