//! Image ingestion: a temporary upload is re-encoded as JPEG into the upload
//! directory and referenced by a relative `uploads/<file>` path.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::ImageReader;
use tempfile::NamedTempFile;
use uuid::Uuid;

use super::storage::{remove_stored_file, RemoveOutcome};

pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// First segment of every stored reference; also the URL path the upload
/// directory is served under.
pub const REFERENCE_PREFIX: &str = "uploads";

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("image i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// An uploaded file still sitting in the temporary directory.
#[derive(Debug)]
pub struct Upload {
    file: NamedTempFile,
    file_name: Option<String>,
}

impl Upload {
    pub fn new(file: NamedTempFile, file_name: Option<String>) -> Self {
        Self { file, file_name }
    }

    pub fn temp_path(&self) -> &Path {
        self.file.path()
    }
}

#[derive(Debug, Clone)]
pub struct ImageIngestor {
    upload_dir: PathBuf,
    quality: u8,
}

impl ImageIngestor {
    pub fn new(upload_dir: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            quality,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Re-encodes `upload`, removes its temporary file and returns the stored reference.
    ///
    /// If encoding fails the temporary file is still removed, because it is dropped
    /// together with the worker closure.
    pub async fn ingest(&self, upload: Upload) -> Result<String, IngestError> {
        let file_name = stored_file_name(upload.file_name.as_deref());
        let target = self.upload_dir.join(&file_name);
        let quality = self.quality;

        let Upload { file, .. } = upload;
        let temp = tokio::task::spawn_blocking(move || -> Result<NamedTempFile, IngestError> {
            compress_to_jpeg(file.path(), &target, quality)?;
            Ok(file)
        })
        .await??;

        let temp_path = temp.path().to_path_buf();
        match temp.close() {
            Ok(()) => tracing::debug!(path = %temp_path.display(), "temp file deleted"),
            Err(e) => {
                tracing::warn!(path = %temp_path.display(), error = %e, "error deleting temp file")
            }
        }

        let reference = format!("{REFERENCE_PREFIX}/{file_name}");
        tracing::info!(reference = %reference, "image ingested");
        Ok(reference)
    }

    /// Maps a stored reference to its file in the upload directory.
    ///
    /// Only the last segment is used, so both `uploads/a.jpg` and legacy
    /// `uploads\a.jpg` resolve, and nothing can point outside the directory.
    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let name = reference.rsplit(['/', '\\']).next()?;
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }
        Some(self.upload_dir.join(name))
    }

    pub async fn discard(&self, reference: &str) -> RemoveOutcome {
        match self.resolve(reference) {
            Some(path) => remove_stored_file(&path).await,
            None => {
                tracing::warn!(reference = %reference, "invalid image reference");
                RemoveOutcome::Failed
            }
        }
    }
}

fn stored_file_name(original: Option<&str>) -> String {
    let extension = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "jpg".to_string());

    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        &suffix[..8],
        extension
    )
}

/// Decodes `source` (format sniffed from its bytes) and writes it to `target` as JPEG.
pub fn compress_to_jpeg(source: &Path, target: &Path, quality: u8) -> Result<(), IngestError> {
    let decoded = ImageReader::open(source)?.with_guessed_format()?.decode()?;
    let rgb = decoded.to_rgb8();

    let result = (|| -> Result<(), IngestError> {
        let mut writer = BufWriter::new(File::create(target)?);
        JpegEncoder::new_with_quality(&mut writer, quality).encode_image(&rgb)?;
        writer.flush()?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(target);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(8, 6, image::Rgba([30, 120, 200, 128]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn upload_in(dir: &Path, bytes: &[u8], name: &str) -> Upload {
        let mut file = NamedTempFile::new_in(dir).unwrap();
        file.write_all(bytes).unwrap();
        Upload::new(file, Some(name.to_string()))
    }

    #[tokio::test]
    async fn test_ingest_reencodes_and_removes_temp() {
        let dir = tempfile::tempdir().unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        let ingestor = ImageIngestor::new(dir.path(), DEFAULT_JPEG_QUALITY);

        let upload = upload_in(temp_dir.path(), &png_bytes(), "Fjord.PNG");
        let temp_path = upload.temp_path().to_path_buf();

        let reference = ingestor.ingest(upload).await.unwrap();
        assert!(reference.starts_with("uploads/"));
        assert!(reference.ends_with(".png"));
        assert!(!temp_path.exists());

        let stored = fs::read(ingestor.resolve(&reference).unwrap()).unwrap();
        assert_eq!(&stored[..2], &[0xFF, 0xD8]);
        assert_eq!(
            image::guess_format(&stored).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[tokio::test]
    async fn test_ingest_reencodes_gif() {
        let dir = tempfile::tempdir().unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        let ingestor = ImageIngestor::new(dir.path(), DEFAULT_JPEG_QUALITY);

        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([200, 40, 40, 255]));
        let mut gif = Cursor::new(Vec::new());
        img.write_to(&mut gif, image::ImageFormat::Gif).unwrap();

        let reference = ingestor
            .ingest(upload_in(temp_dir.path(), gif.get_ref(), "dunes.gif"))
            .await
            .unwrap();
        assert!(reference.ends_with(".gif"));

        let stored = fs::read(ingestor.resolve(&reference).unwrap()).unwrap();
        assert_eq!(
            image::guess_format(&stored).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[tokio::test]
    async fn test_ingest_same_name_twice_gives_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let ingestor = ImageIngestor::new(dir.path(), DEFAULT_JPEG_QUALITY);

        let first = ingestor
            .ingest(upload_in(dir.path(), &png_bytes(), "a.jpg"))
            .await
            .unwrap();
        let second = ingestor
            .ingest(upload_in(dir.path(), &png_bytes(), "a.jpg"))
            .await
            .unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_ingest_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        let ingestor = ImageIngestor::new(dir.path(), DEFAULT_JPEG_QUALITY);

        let upload = upload_in(temp_dir.path(), b"definitely not an image", "notes.jpg");
        let temp_path = upload.temp_path().to_path_buf();

        let result = ingestor.ingest(upload).await;
        assert!(result.is_err());
        assert!(!temp_path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_stored_file_name_extension() {
        assert!(stored_file_name(Some("photo.JPeG")).ends_with(".jpeg"));
        assert!(stored_file_name(Some("no_extension")).ends_with(".jpg"));
        assert!(stored_file_name(None).ends_with(".jpg"));
    }

    #[test]
    fn test_resolve_uses_last_segment_only() {
        let ingestor = ImageIngestor::new("/srv/uploads", DEFAULT_JPEG_QUALITY);

        assert_eq!(
            ingestor.resolve("uploads/1.jpg"),
            Some(PathBuf::from("/srv/uploads/1.jpg"))
        );
        assert_eq!(
            ingestor.resolve("uploads\\2.jpg"),
            Some(PathBuf::from("/srv/uploads/2.jpg"))
        );
        assert_eq!(
            ingestor.resolve("../../etc/passwd"),
            Some(PathBuf::from("/srv/uploads/passwd"))
        );
        assert_eq!(ingestor.resolve("uploads/.."), None);
        assert_eq!(ingestor.resolve("uploads/"), None);
    }
}
