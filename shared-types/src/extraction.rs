use crate::ContactRecord;

/// Core trait that all contact extractors must implement
pub trait Extractor {
    /// Extract contacts from recognized text.
    ///
    /// Extraction never fails: a field that cannot be found is left empty,
    /// and a card without a name or email is dropped.
    fn extract(&self, text: &str) -> Vec<ContactRecord>;

    /// Get extractor version for tracking
    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Export error: {0}")]
    ExportError(String),
}
