pub mod app;
pub mod core;
pub mod features;

pub use app::init_project;
