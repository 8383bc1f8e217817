pub mod scan_manager;
pub mod scan_pipeline;

pub use scan_manager::{is_pdf_mime, ScanManager};
pub use scan_pipeline::{ScanPipeline, ScanSummary, SharedExtractor};
