use async_trait::async_trait;
use image::ImageFormat;
use pdfium_render::prelude::*;
use tracing::warn;

use crate::config::PdfConfig;
use crate::error::{PapyrError, Result};

/// Capability interface for rendering PDF pages to raster images.
///
/// Returns one PNG byte stream per page, in ascending page order.
/// Fails when the document cannot be opened or has zero pages.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    async fn rasterize(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<u8>>>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Pdfium-backed rasterizer.
///
/// Pdfium is not async-safe and its handle is not `Send`, so the library
/// is bound inside a blocking task for each request.
pub struct PdfiumRasterizer {
    dpi: f32,
    // Probed once at construction; binding is a dlopen, too costly for
    // every health check.
    available: bool,
}

impl PdfiumRasterizer {
    pub fn new(config: &PdfConfig) -> Self {
        Self {
            dpi: config.render_dpi,
            available: Self::probe().is_ok(),
        }
    }

    fn bind() -> std::result::Result<Pdfium, PdfiumError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("/usr/lib"))
            })
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                    "/usr/local/lib",
                ))
            })
            .or_else(|_| Pdfium::bind_to_system_library())?;

        Ok(Pdfium::new(bindings))
    }

    /// Check whether the Pdfium library can be loaded at all.
    pub fn probe() -> std::result::Result<(), String> {
        Self::bind().map(|_| ()).map_err(|e| e.to_string())
    }

    fn render_all(pdf_bytes: Vec<u8>, dpi: f32) -> Result<Vec<Vec<u8>>> {
        let pdfium =
            Self::bind().map_err(|e| PapyrError::RasterizerUnavailable(e.to_string()))?;

        let document = pdfium
            .load_pdf_from_byte_vec(pdf_bytes, None)
            .map_err(|e| {
                warn!(error = %e, "Failed to open PDF");
                PapyrError::InvalidInput("Unable to read the PDF file.".to_string())
            })?;

        let page_count = document.pages().len();
        if page_count == 0 {
            return Err(PapyrError::InvalidInput("PDF has no pages.".to_string()));
        }

        let mut rendered = Vec::with_capacity(page_count as usize);
        for page in document.pages().iter() {
            // Page geometry is in points (1/72 inch).
            let target_width = (page.width().value / 72.0 * dpi).round() as i32;
            let config = PdfRenderConfig::new().set_target_width(target_width);

            let bitmap = page.render_with_config(&config).map_err(|e| {
                PapyrError::Extraction(format!("Failed to render PDF page: {e}"))
            })?;

            let mut png = Vec::new();
            bitmap
                .as_image()
                .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
                .map_err(|e| {
                    PapyrError::Extraction(format!("Failed to encode rendered page: {e}"))
                })?;
            rendered.push(png);
        }

        Ok(rendered)
    }
}

#[async_trait]
impl PageRasterizer for PdfiumRasterizer {
    async fn rasterize(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<u8>>> {
        let bytes = pdf_bytes.to_vec();
        let dpi = self.dpi;

        tokio::task::spawn_blocking(move || Self::render_all(bytes, dpi))
            .await
            .map_err(|e| PapyrError::Extraction(format!("Rasterizer task panicked: {e}")))?
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_are_rejected() {
        let rasterizer = PdfiumRasterizer::new(&PdfConfig { render_dpi: 150.0 });
        // Fails either as unreadable input or as an unavailable library,
        // depending on whether Pdfium is installed; never panics.
        let result = rasterizer.rasterize(b"not a pdf").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_probe_does_not_panic() {
        let _ = PdfiumRasterizer::probe();
    }

    #[test]
    fn test_availability_is_cached_from_probe() {
        let rasterizer = PdfiumRasterizer::new(&PdfConfig { render_dpi: 150.0 });
        assert_eq!(rasterizer.is_available(), PdfiumRasterizer::probe().is_ok());
    }
}
