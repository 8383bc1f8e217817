use actix_web::{http::header, web, HttpResponse, Result as ActixResult};
use shared_types::{ContactIdsRequest, ContactQuery, DeleteContactsResponse};
use std::collections::HashSet;
use std::sync::{RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use crate::helpers::contact_view::query_contacts;
use crate::store::{ContactStore, SharedContactStore};

pub const EXPORT_FILE_NAME: &str = "selected_contacts.csv";

#[derive(Clone)]
pub struct ContactsAppState {
    pub store: SharedContactStore,
    pub page_size: usize,
}

impl ContactsAppState {
    fn read(&self) -> ActixResult<RwLockReadGuard<'_, ContactStore>> {
        self.store.read().map_err(|e| {
            actix_web::error::ErrorInternalServerError(format!(
                "Failed to acquire contact store read lock: {}",
                e
            ))
        })
    }

    fn write(&self) -> ActixResult<RwLockWriteGuard<'_, ContactStore>> {
        self.store.write().map_err(|e| {
            actix_web::error::ErrorInternalServerError(format!(
                "Failed to acquire contact store write lock: {}",
                e
            ))
        })
    }
}

pub async fn list_contacts(
    state: web::Data<ContactsAppState>,
    query: web::Query<ContactQuery>,
) -> ActixResult<HttpResponse> {
    let store = state.read()?;
    let page = query_contacts(store.all(), &query, state.page_size);

    Ok(HttpResponse::Ok().json(page))
}

pub async fn get_contact(
    state: web::Data<ContactsAppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();
    let store = state.read()?;

    let contact = store.get(&contact_id).ok_or_else(|| {
        actix_web::error::ErrorNotFound(format!("Contact {} not found", contact_id))
    })?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn delete_contact(
    state: web::Data<ContactsAppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();
    let mut store = state.write()?;

    if !store.remove(&contact_id) {
        return Err(actix_web::error::ErrorNotFound(format!(
            "Contact {} not found",
            contact_id
        )));
    }

    Ok(HttpResponse::Ok().json(DeleteContactsResponse {
        removed: 1,
        remaining: store.len(),
    }))
}

/// Unknown ids are skipped.
pub async fn delete_selected_contacts(
    state: web::Data<ContactsAppState>,
    request: web::Json<ContactIdsRequest>,
) -> ActixResult<HttpResponse> {
    let ids: HashSet<String> = request.into_inner().ids.into_iter().collect();
    let mut store = state.write()?;
    let removed = store.remove_many(&ids);

    info!("Deleted {} selected contacts", removed);

    Ok(HttpResponse::Ok().json(DeleteContactsResponse {
        removed,
        remaining: store.len(),
    }))
}

pub async fn clear_contacts(state: web::Data<ContactsAppState>) -> ActixResult<HttpResponse> {
    let mut store = state.write()?;
    let removed = store.len();
    store.clear();

    info!("Cleared {} contacts", removed);

    Ok(HttpResponse::Ok().json(DeleteContactsResponse {
        removed,
        remaining: 0,
    }))
}

/// CSV of the selected contacts, in store order.
pub async fn export_contacts(
    state: web::Data<ContactsAppState>,
    request: web::Json<ContactIdsRequest>,
) -> ActixResult<HttpResponse> {
    let ids: HashSet<String> = request.into_inner().ids.into_iter().collect();
    if ids.is_empty() {
        return Err(actix_web::error::ErrorBadRequest(
            "Select at least one contact to export",
        ));
    }

    let selected = state.read()?.select(&ids);
    let csv = extractors::export_contacts(&selected)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    info!("Exported {} contacts", selected.len());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
        ))
        .body(csv))
}
