use actix_multipart::form::MultipartForm;
use actix_web::{get, http::header, post, web, HttpResponse};
use rand::Rng;

use crate::gallery::render::render_page;
use crate::gallery::{build, reduce, Action, ViewQuery, ViewState};
use crate::handlers::destination_handler::DestinationForm;
use crate::message::AppError;
use crate::services::DestinationService;

const SUBMITTED: &str = "Your contribution has been submitted!";
const UPDATED: &str = "Your changes have been saved.";
const DELETED: &str = "The destination has been removed.";

#[get("/")]
pub async fn gallery_page(
    query: web::Query<ViewQuery>,
    service: web::Data<DestinationService>,
) -> Result<HttpResponse, AppError> {
    let destinations = service.list().await?;
    let state = ViewState::from(&query.into_inner());

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(render_page(&build(&state, &destinations))))
}

/// Picks a random destination and shows it.
#[get("/explore")]
pub async fn explore(service: web::Data<DestinationService>) -> Result<HttpResponse, AppError> {
    let destinations = service.list().await?;

    let pick = if destinations.is_empty() {
        None
    } else {
        let index = rand::rng().random_range(0..destinations.len());
        Some(destinations[index].id)
    };

    let state = reduce(
        &ViewState::default(),
        Action::Explore { pick },
        destinations.len(),
    );
    Ok(see_other(&state.href()))
}

#[post("/gallery/destinations")]
pub async fn submit_destination(
    query: web::Query<ViewQuery>,
    service: web::Data<DestinationService>,
    MultipartForm(form): MultipartForm<DestinationForm>,
) -> HttpResponse {
    let state = ViewState::from(&query.into_inner());
    let outcome = service
        .create(form.into())
        .await
        .map(|_| Action::Submitted(SUBMITTED.to_string()));

    respond(&service, &state, outcome).await
}

#[post("/gallery/destinations/{id}")]
pub async fn submit_changes(
    path: web::Path<i64>,
    query: web::Query<ViewQuery>,
    service: web::Data<DestinationService>,
    MultipartForm(form): MultipartForm<DestinationForm>,
) -> HttpResponse {
    let state = ViewState::from(&query.into_inner());
    let outcome = service
        .update(path.into_inner(), form.into())
        .await
        .map(|_| Action::Submitted(UPDATED.to_string()));

    respond(&service, &state, outcome).await
}

#[post("/gallery/destinations/{id}/delete")]
pub async fn submit_delete(
    path: web::Path<i64>,
    query: web::Query<ViewQuery>,
    service: web::Data<DestinationService>,
) -> HttpResponse {
    let state = ViewState::from(&query.into_inner());
    let outcome = service
        .delete(path.into_inner())
        .await
        .map(|_| Action::Deleted(DELETED.to_string()));

    respond(&service, &state, outcome).await
}

async fn respond(
    service: &DestinationService,
    state: &ViewState,
    outcome: Result<Action, AppError>,
) -> HttpResponse {
    let action = outcome.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "gallery submission failed");
        Action::Failed(format!("Something went wrong: {}", e.message()))
    });

    let total = match service.list().await {
        Ok(destinations) => destinations.len(),
        Err(e) => {
            tracing::warn!(error = %e, "could not count destinations");
            0
        }
    };

    see_other(&reduce(state, action, total).href())
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
