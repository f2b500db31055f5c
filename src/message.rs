use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

use crate::utils::ingest::IngestError;

#[derive(Debug, Serialize)]
pub enum AppSuccess {
    Created,
    Updated,
    Deleted,
}

impl AppSuccess {
    pub fn message(&self) -> String {
        match self {
            AppSuccess::Created => "Destination added successfully.".to_string(),
            AppSuccess::Updated => "Destination updated successfully.".to_string(),
            AppSuccess::Deleted => "Destination successfully deleted".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Destination {0} not found.")]
    NotFound(i64),

    #[error("{0}")]
    BadRequest(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Error processing images")]
    ImageProcessing(#[from] IngestError),
}

impl AppError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::ImageProcessing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Storage(e) => tracing::error!(error = %e, "database operation failed"),
            AppError::ImageProcessing(e) => tracing::error!(error = %e, "image processing failed"),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.message(),
        }))
    }
}
