use actix_web::{http::header, web, HttpRequest, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use shared_types::ScanJobListResponse;
use std::sync::Arc;
use tracing::info;

use crate::jobs::{is_pdf_mime, ScanManager};

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub file_name: Option<String>,
}

/// Raw PDF body in, scan job out. Anything that is not `application/pdf`
/// is ignored without an error.
pub async fn create_scan(
    manager: web::Data<Arc<ScanManager>>,
    query: web::Query<UploadQuery>,
    req: HttpRequest,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let file_name = query
        .into_inner()
        .file_name
        .unwrap_or_else(|| "upload.pdf".to_string());

    if !is_pdf_mime(content_type) {
        info!("Ignoring {} with content type {:?}", file_name, content_type);
        return Ok(HttpResponse::NoContent().finish());
    }

    let job = manager.start_scan(file_name, body.to_vec()).await;

    Ok(HttpResponse::Accepted().json(job))
}

pub async fn list_scans(manager: web::Data<Arc<ScanManager>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ScanJobListResponse {
        jobs: manager.list_jobs(),
    }))
}

pub async fn get_scan(
    manager: web::Data<Arc<ScanManager>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let job_id = path.into_inner();

    let job = manager
        .get_job(&job_id)
        .ok_or_else(|| actix_web::error::ErrorNotFound(format!("Scan {} not found", job_id)))?;

    Ok(HttpResponse::Ok().json(job))
}
