use crate::config::ApiConfig;
use crate::ocr::{PageRasterizer, PopplerRasterizer, ScanError, TesseractRecognizer, TextRecognizer};
use extractors::BusinessCardExtractor;
use shared_types::{ContactRecord, ExtractionError, Extractor};
use std::sync::Arc;
use tracing::{debug, info};

pub type SharedExtractor = Arc<dyn Extractor + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub pages: usize,
    pub contacts: usize,
}

/// Rasterize, recognize and extract a PDF one page at a time.
#[derive(Clone)]
pub struct ScanPipeline {
    rasterizer: Arc<dyn PageRasterizer>,
    recognizer: Arc<dyn TextRecognizer>,
    extractor: SharedExtractor,
}

impl ScanPipeline {
    pub fn new(
        rasterizer: Arc<dyn PageRasterizer>,
        recognizer: Arc<dyn TextRecognizer>,
        extractor: SharedExtractor,
    ) -> Self {
        Self {
            rasterizer,
            recognizer,
            extractor,
        }
    }

    /// Poppler and Tesseract as configured, extracting with the configured entity table.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ExtractionError> {
        let scanner = config.scanner();
        let extractor = BusinessCardExtractor::new(&config.entity_table())?;

        Ok(Self::new(
            Arc::new(PopplerRasterizer::new(scanner.pdftoppm_path, scanner.dpi)),
            Arc::new(TesseractRecognizer::new(scanner.tesseract_path, scanner.language)),
            Arc::new(extractor),
        ))
    }

    /// Runs every page through the pipeline and calls `on_page` with that
    /// page's contacts and `(completed, total)` before moving on.
    ///
    /// Only one page image exists at a time. The first error stops the run;
    /// pages already handed to `on_page` are not taken back.
    pub async fn run<F>(&self, pdf: &[u8], mut on_page: F) -> Result<ScanSummary, ScanError>
    where
        F: FnMut(Vec<ContactRecord>, usize, usize) + Send,
    {
        let document = self.rasterizer.open(pdf).await?;
        let total = document.page_count();
        info!("Scanning PDF with {} pages", total);

        let mut summary = ScanSummary {
            pages: total,
            contacts: 0,
        };

        for page_number in 1..=total {
            let text = {
                let image = document.render_page(page_number).await?;
                self.recognizer.recognize(&image).await?
            };

            let contacts = self.extractor.extract(&text);
            debug!(
                "Page {}/{}: {} contacts from {} characters",
                page_number,
                total,
                contacts.len(),
                text.len()
            );

            summary.contacts += contacts.len();
            on_page(contacts, page_number, total);
        }

        Ok(summary)
    }
}
