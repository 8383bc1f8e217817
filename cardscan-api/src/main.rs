use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use cardscan_api::handlers::{self, contacts::ContactsAppState, settings::SettingsAppState};
use cardscan_api::jobs::{ScanManager, ScanPipeline};
use cardscan_api::{config, ContactStore, SharedContactStore};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

#[get("/health")]
async fn health(store: web::Data<SharedContactStore>) -> impl Responder {
    match store.read() {
        Ok(store) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "contacts": store.len()
        })),
        Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "unhealthy"
        })),
    }
}

#[get("/api/settings")]
async fn get_settings(data: web::Data<SettingsAppState>) -> impl Responder {
    handlers::settings::get_settings(data).await
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("cardscan-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let (config, config_path) = config::ApiConfig::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load config: {}", e)))?;
    tracing::info!("Using config at {:?}", config_path);

    let pipeline = ScanPipeline::from_config(&config)
        .map_err(|e| std::io::Error::other(format!("Invalid entity table: {}", e)))?;

    let store = ContactStore::shared();
    let scan_manager = Arc::new(ScanManager::new(store.clone(), pipeline));

    let server_config = config.server.clone().unwrap_or_default();
    let (host, port) = (server_config.host.clone(), server_config.port);
    let upload_limit = server_config.max_upload_mb * 1024 * 1024;

    let contacts_state = ContactsAppState {
        store: store.clone(),
        page_size: config.scanner().page_size,
    };
    let settings_state = SettingsAppState {
        config: Arc::new(config.clone()),
        config_path,
    };

    tracing::info!("Starting server on {}:{}", host, port);

    let server = HttpServer::new(move || {
        let cors = if let Some(cors_config) = &config.cors {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .expose_headers(vec!["Content-Disposition"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .expose_headers(vec!["Content-Disposition"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::PayloadConfig::new(upload_limit))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(contacts_state.clone()))
            .app_data(web::Data::new(settings_state.clone()))
            .app_data(web::Data::new(scan_manager.clone()))
            .service(health)
            .service(get_settings)
            .route("/api/scans", web::post().to(handlers::scans::create_scan))
            .route("/api/scans", web::get().to(handlers::scans::list_scans))
            .route("/api/scans/{id}", web::get().to(handlers::scans::get_scan))
            .route("/api/contacts", web::get().to(handlers::contacts::list_contacts))
            .route("/api/contacts", web::delete().to(handlers::contacts::clear_contacts))
            .route("/api/contacts/delete", web::post().to(handlers::contacts::delete_selected_contacts))
            .route("/api/contacts/export", web::post().to(handlers::contacts::export_contacts))
            .route("/api/contacts/{id}", web::get().to(handlers::contacts::get_contact))
            .route("/api/contacts/{id}", web::delete().to(handlers::contacts::delete_contact))
    })
    .bind((host.as_str(), port))?
    .run();

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
    });

    server.await
}
