use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::message::{AppError, AppSuccess};
use crate::services::{DestinationService, DestinationSubmission};
use crate::utils::ingest::Upload;

/// Multipart body shared by create and update.
#[derive(Debug, MultipartForm)]
pub struct DestinationForm {
    pub name: Option<Text<String>>,
    pub location: Option<Text<String>>,
    pub description: Option<Text<String>>,
    #[multipart(rename = "backgroundImage")]
    pub background_image: Option<TempFile>,
    #[multipart(rename = "galleryImage")]
    pub gallery_image: Option<TempFile>,
}

impl From<DestinationForm> for DestinationSubmission {
    fn from(form: DestinationForm) -> Self {
        DestinationSubmission {
            name: form.name.map(Text::into_inner),
            location: form.location.map(Text::into_inner),
            description: form.description.map(Text::into_inner),
            background_image: form.background_image.and_then(into_upload),
            gallery_image: form.gallery_image.and_then(into_upload),
        }
    }
}

/// Browsers send an empty part for an untouched file input.
fn into_upload(part: TempFile) -> Option<Upload> {
    if part.size == 0 {
        return None;
    }
    Some(Upload::new(part.file, part.file_name))
}

#[get("/destinations")]
pub async fn list_destinations(
    service: web::Data<DestinationService>,
) -> Result<HttpResponse, AppError> {
    let destinations = service.list().await?;
    Ok(HttpResponse::Ok().json(destinations))
}

#[get("/destinations/{id}")]
pub async fn get_destination(
    path: web::Path<i64>,
    service: web::Data<DestinationService>,
) -> Result<HttpResponse, AppError> {
    let destination = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(destination))
}

#[post("/destinations")]
pub async fn create_destination(
    service: web::Data<DestinationService>,
    MultipartForm(form): MultipartForm<DestinationForm>,
) -> Result<HttpResponse, AppError> {
    let id = service.create(form.into()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": id,
        "message": AppSuccess::Created.message(),
    })))
}

#[put("/destinations/{id}")]
pub async fn update_destination(
    path: web::Path<i64>,
    service: web::Data<DestinationService>,
    MultipartForm(form): MultipartForm<DestinationForm>,
) -> Result<HttpResponse, AppError> {
    let id = service.update(path.into_inner(), form.into()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": id,
        "message": AppSuccess::Updated.message(),
    })))
}

#[delete("/destinations/{id}")]
pub async fn delete_destination(
    path: web::Path<i64>,
    service: web::Data<DestinationService>,
) -> Result<HttpResponse, AppError> {
    let changes = service.delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": AppSuccess::Deleted.message(),
        "changes": changes,
    })))
}
