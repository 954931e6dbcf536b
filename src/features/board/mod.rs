pub mod components;
pub mod controller;
pub mod dom;
pub mod handlers;
pub mod ordering;
pub mod snapshot;
pub mod sortable;
pub mod surface;

pub use components::*;
pub use controller::BoardController;
pub use snapshot::*;
pub use surface::{BoardSurface, DomSurface, LabelText, TitleField};
