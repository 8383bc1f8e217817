use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Scan of one uploaded PDF: rasterize, recognize and extract, page by page.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScanJob {
    pub id: String,
    pub file_name: String,
    pub status: ScanJobStatus,
    pub progress: ScanProgress,
    pub error_message: Option<String>,
    pub created_at: i64,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ScanJobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScanProgress {
    pub total_pages: u64,
    pub processed_pages: u64,
    pub contacts_extracted: u64,
    pub percent_complete: f32,
}

impl ScanProgress {
    pub fn record_page(&mut self, processed_pages: u64, total_pages: u64, contacts: u64) {
        self.total_pages = total_pages;
        self.processed_pages = processed_pages;
        self.contacts_extracted += contacts;
        self.percent_complete = if total_pages == 0 {
            100.0
        } else {
            (processed_pages as f32 / total_pages as f32) * 100.0
        };
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ScanJobListResponse {
    pub jobs: Vec<ScanJob>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_page_progress() {
        let mut progress = ScanProgress::default();
        progress.record_page(1, 4, 2);
        progress.record_page(2, 4, 1);

        assert_eq!(progress.processed_pages, 2);
        assert_eq!(progress.contacts_extracted, 3);
        assert_eq!(progress.percent_complete, 50.0);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ScanJobStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
