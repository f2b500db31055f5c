use actix_cors::Cors;
use actix_multipart::form::{tempfile::TempFileConfig, MultipartFormConfig};
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_destinations::{config::Config, init_service, routes};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_destinations=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let service = web::Data::new(init_service(&config).await?);

    let temp_dir = config.upload_temp_dir.clone();
    let max_upload_bytes = config.max_upload_bytes;
    let upload_dir = config.upload_dir.clone();
    let static_dir = config.static_dir.clone();

    tracing::info!("Server running on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(service.clone())
            .app_data(TempFileConfig::default().directory(&temp_dir))
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(max_upload_bytes)
                    .memory_limit(64 * 1024),
            )
            .configure(routes::config)
            .configure(|cfg| routes::assets(cfg, &upload_dir, &static_dir))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
