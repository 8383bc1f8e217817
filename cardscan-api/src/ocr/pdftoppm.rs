use super::{PageImage, PageRasterizer, RasterDocument, ScanError};
use async_trait::async_trait;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

/// Renders PDF pages with Poppler's `pdftoppm`, one page per invocation.
pub struct PopplerRasterizer {
    binary: String,
    dpi: u32,
}

impl PopplerRasterizer {
    pub fn new(binary: impl Into<String>, dpi: u32) -> Self {
        Self {
            binary: binary.into(),
            dpi,
        }
    }

    async fn open_document(&self, pdf: &[u8]) -> Result<PopplerDocument, ScanError> {
        let page_count = count_pages(pdf)?;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("document.pdf");
        tokio::fs::write(&path, pdf).await?;

        debug!("Opened PDF with {} pages at {:?}", page_count, path);

        Ok(PopplerDocument {
            dir,
            path,
            page_count,
            binary: self.binary.clone(),
            dpi: self.dpi,
        })
    }
}

#[async_trait]
impl PageRasterizer for PopplerRasterizer {
    async fn open(&self, pdf: &[u8]) -> Result<Box<dyn RasterDocument>, ScanError> {
        Ok(Box::new(self.open_document(pdf).await?))
    }
}

/// Validates the bytes as a PDF and counts its pages.
pub fn count_pages(pdf: &[u8]) -> Result<usize, ScanError> {
    let document =
        lopdf::Document::load_mem(pdf).map_err(|e| ScanError::InvalidPdf(e.to_string()))?;
    Ok(document.get_pages().len())
}

/// The PDF lives in its own temp dir until the document is dropped.
struct PopplerDocument {
    dir: TempDir,
    path: PathBuf,
    page_count: usize,
    binary: String,
    dpi: u32,
}

#[async_trait]
impl RasterDocument for PopplerDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    async fn render_page(&self, page_number: usize) -> Result<PageImage, ScanError> {
        let rasterization_error = |message: String| ScanError::Rasterization {
            page: page_number,
            message,
        };

        let prefix = self.dir.path().join(format!("page-{}", page_number));
        let page = page_number.to_string();

        let output = Command::new(&self.binary)
            .arg("-f")
            .arg(&page)
            .arg("-l")
            .arg(&page)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg("-singlefile")
            .arg(&self.path)
            .arg(&prefix)
            .output()
            .await
            .map_err(|e| rasterization_error(format!("{} failed to start: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(rasterization_error(stderr.trim().to_string()));
        }

        let png_path = prefix.with_extension("png");
        let png = tokio::fs::read(&png_path).await.map_err(|e| {
            rasterization_error(format!("missing output {}: {}", png_path.display(), e))
        })?;
        let _ = tokio::fs::remove_file(&png_path).await;

        Ok(PageImage { page_number, png })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::{dictionary, Document, Object};

    pub(crate) fn blank_pdf(pages: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = (0..pages)
            .map(|_| {
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![0.into(), 0.into(), 252.into(), 144.into()],
                })
                .into()
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_count_pages() {
        assert_eq!(count_pages(&blank_pdf(3)).unwrap(), 3);
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = count_pages(b"PK\x03\x04 not a pdf").unwrap_err();
        assert!(matches!(err, ScanError::InvalidPdf(_)));
    }

    #[tokio::test]
    async fn test_open_writes_document_and_cleans_up_on_drop() {
        let rasterizer = PopplerRasterizer::new("pdftoppm", 144);

        let document = rasterizer.open_document(&blank_pdf(2)).await.unwrap();
        assert_eq!(document.page_count(), 2);
        assert!(document.path.exists());

        let dir_path = document.dir.path().to_path_buf();
        drop(document);
        assert!(!dir_path.exists());
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_rasterization_error() {
        let rasterizer = PopplerRasterizer::new("/nonexistent/pdftoppm", 144);
        let document = rasterizer.open(&blank_pdf(1)).await.unwrap();

        let err = document.render_page(1).await.unwrap_err();
        assert!(matches!(err, ScanError::Rasterization { page: 1, .. }));
    }
}
