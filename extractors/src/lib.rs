//! Extractors Crate
//!
//! This crate turns recognized business card text into structured contacts
//! and renders contacts back out as CSV.
//!
//! # Architecture
//!
//! - **Types**: `ContactRecord`, `EntityTable` and the `Extractor` trait live in `shared-types`
//! - **Implementations**: Concrete extractors are implemented in this crate
//!
//! # Available Extractors
//!
//! - `BusinessCardExtractor`: Segments a page into cards and reads name, title, company,
//!   email, phone, website and address from each
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{contact_csv, BusinessCardExtractor};
//!
//! let extractor = BusinessCardExtractor::with_defaults()?;
//! let contacts = extractor.extract_contacts(&page_text);
//! let csv = contact_csv::export_contacts(&contacts)?;
//! ```

pub mod business_card;
pub mod contact_csv;

// Re-export commonly used types
pub use business_card::BusinessCardExtractor;
pub use contact_csv::{export_contacts, CSV_HEADER};

// Re-export the Extractor trait from shared-types for convenience
pub use shared_types::Extractor;
