use std::path::Path;

use actix_files::Files;
use actix_web::web;

use crate::handlers::destination_handler::{
    create_destination, delete_destination, get_destination, list_destinations,
    update_destination,
};
use crate::handlers::gallery_handler::{
    explore, gallery_page, submit_changes, submit_delete, submit_destination,
};
use crate::utils::ingest::REFERENCE_PREFIX;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_destinations)
        .service(get_destination)
        .service(create_destination)
        .service(update_destination)
        .service(delete_destination)
        .service(gallery_page)
        .service(explore)
        .service(submit_destination)
        .service(submit_changes)
        .service(submit_delete);
}

/// Uploaded images under `/uploads`, stylesheets and images from the static dir.
pub fn assets(cfg: &mut web::ServiceConfig, upload_dir: &Path, static_dir: &Path) {
    cfg
        .service(Files::new(&format!("/{REFERENCE_PREFIX}"), upload_dir))
        .service(Files::new("/css", static_dir.join("css")))
        .service(Files::new("/images", static_dir.join("images")));
}
