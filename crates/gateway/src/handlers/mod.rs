//! HTTP handlers.

pub mod greeting_handler;
pub mod health_handler;
pub mod user_handler;

pub use greeting_handler::greeting_routes;
pub use health_handler::health_routes;
pub use user_handler::user_routes;
