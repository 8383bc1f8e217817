use crate::config::ApiConfig;
use actix_web::{web, HttpResponse, Result};
use shared_types::SettingsResponse;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct SettingsAppState {
    pub config: Arc<ApiConfig>,
    pub config_path: PathBuf,
}

pub async fn get_settings(data: web::Data<SettingsAppState>) -> Result<HttpResponse> {
    let response = SettingsResponse {
        config_file_path: data.config_path.to_string_lossy().to_string(),
        page_size: data.config.scanner().page_size,
        entities: data.config.entity_table(),
    };

    Ok(HttpResponse::Ok().json(response))
}
