mod fields;
mod segmenter;

pub use fields::{AddressMatcher, FieldPatterns, LineMatcher};
pub use segmenter::CardSegmenter;

use shared_types::{CompanyAlias, ContactRecord, EntityTable, ExtractionError, Extractor};
use tracing::debug;
use uuid::Uuid;

/// Turns the recognized text of a scanned page into contact records.
///
/// All entity knowledge (delimiters, companies, people, titles, address
/// vocabulary) comes from the [`EntityTable`] the extractor was built with.
pub struct BusinessCardExtractor {
    segmenter: CardSegmenter,
    fields: FieldPatterns,
    names: LineMatcher,
    titles: LineMatcher,
    address: AddressMatcher,
    companies: Vec<CompanyAlias>,
}

impl BusinessCardExtractor {
    pub fn new(table: &EntityTable) -> Result<Self, ExtractionError> {
        Ok(Self {
            segmenter: CardSegmenter::new(&table.delimiters)?,
            fields: FieldPatterns::new()?,
            names: LineMatcher::new(&table.names)?,
            titles: LineMatcher::new(&table.titles)?,
            address: AddressMatcher::new(&table.address_keywords, &table.cities)?,
            companies: table.companies.clone(),
        })
    }

    /// Create an extractor for the built-in entity table
    pub fn with_defaults() -> Result<Self, ExtractionError> {
        Self::new(&EntityTable::default())
    }

    pub fn extract_contacts(&self, page_text: &str) -> Vec<ContactRecord> {
        let segments = self.segmenter.segments(page_text);
        debug!("Split page text into {} card segments", segments.len());

        segments
            .into_iter()
            .filter_map(|segment| self.extract_card(segment))
            .collect()
    }

    fn extract_card(&self, segment: &str) -> Option<ContactRecord> {
        let lines: Vec<&str> = segment
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();

        let contact = ContactRecord {
            id: Uuid::new_v4().to_string(),
            name: self.names.first_line(&lines),
            title: self.titles.first_line(&lines),
            company: fields::resolve_company(&self.companies, segment),
            email: self.fields.email(segment),
            phone: self.fields.phone(segment),
            website: self.fields.website(segment),
            address: self.address.address(&lines),
            extracted_text: segment.trim().to_string(),
        };

        if !contact.has_identity() {
            debug!("Dropping card segment without name or email");
            return None;
        }

        Some(contact)
    }
}

impl Extractor for BusinessCardExtractor {
    fn extract(&self, text: &str) -> Vec<ContactRecord> {
        self.extract_contacts(text)
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
