use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    AlreadyAbsent,
    Failed,
}

/// Best-effort removal of a stored file. Never fails the caller.
pub async fn remove_stored_file(path: &Path) -> RemoveOutcome {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed stored image");
            RemoveOutcome::Removed
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            // the file is already gone, which is what we wanted
            tracing::debug!(path = %path.display(), "stored image already absent");
            RemoveOutcome::AlreadyAbsent
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove stored image");
            RemoveOutcome::Failed
        }
    }
}
