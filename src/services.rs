pub mod destination;

pub use destination::{DestinationService, DestinationSubmission};
