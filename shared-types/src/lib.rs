pub mod contact;
pub mod entity_table;
pub mod extraction;
pub mod scan_job;
pub mod settings;

pub use contact::{
    ContactField, ContactIdsRequest, ContactPage, ContactQuery, ContactRecord,
    DeleteContactsResponse, SortDirection,
};
pub use entity_table::{CompanyAlias, EntityTable};
pub use extraction::{ExtractionError, Extractor};
pub use scan_job::{ScanJob, ScanJobListResponse, ScanJobStatus, ScanProgress};
pub use settings::SettingsResponse;
