//! PDF page rasterization.
//!
//! PDF uploads are converted page by page into PNG byte streams and fed
//! through the same OCR pipeline as plain image uploads. Rendering is
//! delegated to Pdfium via the [`PageRasterizer`] capability trait so
//! tests can substitute a stub.

mod rasterize;

pub use rasterize::{PageRasterizer, PdfiumRasterizer};
