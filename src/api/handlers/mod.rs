//! HTTP request handlers.

pub mod advertisement_handler;
pub mod auth_handler;
pub mod health_handler;

pub use advertisement_handler::{create_advertisement, list_advertisements};
pub use auth_handler::auth_routes;
pub use health_handler::health;
