//! External collaborators of the scan pipeline: turning PDF pages into
//! images and images into text.
//!
//! Both sides are traits so the pipeline can run against the Poppler and
//! Tesseract command line tools in production and against fakes in tests.

mod pdftoppm;
mod tesseract;

pub use pdftoppm::{count_pages, PopplerRasterizer};
pub use tesseract::TesseractRecognizer;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Failed to render page {page}: {message}")]
    Rasterization { page: usize, message: String },

    #[error("Failed to recognize text on page {page}: {message}")]
    Recognition { page: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One rendered page, PNG encoded.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// 1-based
    pub page_number: usize,
    pub png: Vec<u8>,
}

#[async_trait]
pub trait PageRasterizer: Send + Sync {
    /// Open a PDF for rendering. Fails if the bytes are not a readable PDF.
    async fn open(&self, pdf: &[u8]) -> Result<Box<dyn RasterDocument>, ScanError>;
}

/// An opened PDF. Whatever it holds on to is released when it is dropped.
#[async_trait]
pub trait RasterDocument: Send + Sync {
    fn page_count(&self) -> usize;

    async fn render_page(&self, page_number: usize) -> Result<PageImage, ScanError>;
}

#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &PageImage) -> Result<String, ScanError>;
}
