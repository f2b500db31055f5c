use std::{
    env,
    fmt::Display,
    path::{Component, Path, PathBuf},
    str::FromStr,
};

use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub upload_dir: PathBuf,
    /// Multipart parts are spooled here before ingestion. Never inside
    /// `upload_dir`, which is publicly served.
    pub upload_temp_dir: PathBuf,
    pub static_dir: PathBuf,
    pub jpeg_quality: u8,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let jpeg_quality: u8 = try_load("JPEG_QUALITY", "80")?;
        if !(1..=100).contains(&jpeg_quality) {
            return Err(ConfigError::Invalid {
                key: "JPEG_QUALITY",
                message: format!("{jpeg_quality} is outside 1..=100"),
            });
        }

        let upload_dir: PathBuf = try_load("UPLOAD_DIR", "uploads")?;
        let upload_temp_dir: PathBuf = try_load("UPLOAD_TEMP_DIR", "upload_tmp")?;
        check_temp_dir(&upload_dir, &upload_temp_dir)?;

        Ok(Self {
            host: try_load("HOST", "127.0.0.1")?,
            port: try_load("PORT", "3000")?,
            database_url: try_load("DATABASE_URL", "sqlite://travel_destinations.db")?,
            upload_dir,
            upload_temp_dir,
            static_dir: try_load("STATIC_DIR", "static")?,
            jpeg_quality,
            max_upload_bytes: try_load("MAX_UPLOAD_BYTES", "20971520")?,
        })
    }
}

// lexical only; symlinks are not followed
fn check_temp_dir(upload_dir: &Path, temp_dir: &Path) -> Result<(), ConfigError> {
    let normal = |p: &Path| -> PathBuf {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    };

    if normal(temp_dir).starts_with(normal(upload_dir)) {
        return Err(ConfigError::Invalid {
            key: "UPLOAD_TEMP_DIR",
            message: format!(
                "{} is inside the served upload directory {}",
                temp_dir.display(),
                upload_dir.display()
            ),
        });
    }
    Ok(())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            message: e.to_string(),
        }
    })
}
