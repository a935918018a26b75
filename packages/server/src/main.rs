#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the fire perimeter map.
//!
//! Serves the REST API consumed by the Leaflet frontend and the
//! static frontend itself. The perimeter bundle URL is the single
//! inbound configuration value; the dataset is loaded lazily on first
//! request and cached per URL.

mod handlers;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use fire_map_pipeline::DatasetCache;

/// Shared application state.
pub struct AppState {
    /// Dataset cache keyed by locator URL.
    pub cache: DatasetCache,
    /// Configured perimeter bundle URL.
    pub archive_url: String,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let Ok(archive_url) = std::env::var("ARCHIVE_URL") else {
        log::error!("ARCHIVE_URL is not set; nothing to serve");
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "ARCHIVE_URL is required",
        ));
    };

    let state = web::Data::new(AppState {
        cache: DatasetCache::new(),
        archive_url,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/map", web::get().to(handlers::map_data))
                    .route("/attributes", web::get().to(handlers::attributes)),
            )
            // Serve the Leaflet frontend
            .service(Files::new("/", "web").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
