pub mod board_api;
pub mod http;

pub use board_api::*;
pub use http::*;
