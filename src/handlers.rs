pub mod destination_handler;
pub mod gallery_handler;
