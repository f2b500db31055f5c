pub mod config;
pub mod gallery;
pub mod handlers;
pub mod message;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;


use anyhow::Context;

use crate::config::Config;
use crate::services::DestinationService;
use crate::store::DestinationStore;
use crate::utils::ingest::ImageIngestor;

/// Creates the upload directories, opens the database and applies migrations.
pub async fn init_service(config: &Config) -> anyhow::Result<DestinationService> {
    for dir in [&config.upload_dir, &config.upload_temp_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create upload directory {}", dir.display()))?;
    }

    let store = DestinationStore::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    tracing::info!(database_url = %config.database_url, "connected to the SQLite database");

    let images = ImageIngestor::new(&config.upload_dir, config.jpeg_quality);
    Ok(DestinationService::new(store, images))
}
