//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → controller.rs (extract ApiRequest, resolve FormatMode)
//!     → handlers.rs (endpoint logic, input params)
//!     → provider/ (JSON or XML serialization)
//!     → response.rs (status, reason phrase, headers)
//!     → Send to client
//! ```

pub mod controller;
pub mod error;
pub mod format;
pub mod handlers;
pub mod params;
pub mod provider;
pub mod request;
pub mod response;
pub mod server;
pub mod settings;
pub mod status;

pub use controller::ApiController;
pub use error::{ApiError, ACCESS_DENIED_MESSAGE};
pub use format::FormatMode;
pub use provider::{JsonProvider, ResponseProvider, XmlProvider};
pub use request::{ApiRequest, UuidRequestId, X_REQUEST_ID};
pub use response::ApiResponse;
pub use server::HttpServer;
pub use settings::ResponseSettings;
