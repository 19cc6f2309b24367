//! Content-negotiating API responses for axum services.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ApiConfig;
pub use http::{ApiController, ApiError, ApiResponse, FormatMode, HttpServer};
pub use lifecycle::Shutdown;
