//! The gallery client: an explicit view state, a pure reducer over it, and a
//! deterministic rendering of the resulting view model.

pub mod render;
pub mod state;
pub mod view;

pub use state::{reduce, Action, Modal, Notice, Screen, ViewQuery, ViewState, PAGE_SIZE};
pub use view::{build, GalleryView, TitleSize};
