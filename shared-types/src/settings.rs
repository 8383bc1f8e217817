use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::EntityTable;

/// Response for settings endpoint
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettingsResponse {
    pub config_file_path: String,
    pub page_size: usize,
    pub entities: EntityTable,
}
