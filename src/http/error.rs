//! Errors surfaced to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::http::format::FormatMode;
use crate::http::provider::{JsonProvider, ResponseProvider, XmlProvider};

pub const ACCESS_DENIED_MESSAGE: &str = "You do not have sufficient permissions to access.";

/// Root element for XML error documents.
const XML_ERROR_ROOT: &str = "error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Forbidden { format: FormatMode, message: String },

    #[error("failed to serialize {format} response: {reason}")]
    Serialization { format: FormatMode, reason: String },

    #[error("failed to read request body: {reason}")]
    BodyRead { format: FormatMode, reason: String },
}

impl ApiError {
    pub fn forbidden(format: FormatMode) -> Self {
        ApiError::Forbidden {
            format,
            message: ACCESS_DENIED_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiError::Forbidden { .. } => 403,
            ApiError::Serialization { .. } => 500,
            ApiError::BodyRead { .. } => 400,
        }
    }

    /// Format the error body is rendered in.
    pub fn format(&self) -> FormatMode {
        match self {
            ApiError::Forbidden { format, .. }
            | ApiError::Serialization { format, .. }
            | ApiError::BodyRead { format, .. } => *format,
        }
    }

    /// Message shown to the client. Internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Forbidden { message, .. } => message.clone(),
            ApiError::Serialization { .. } => "Internal Server Error".to_string(),
            ApiError::BodyRead { .. } => "Request body could not be read.".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Serialization { .. } => tracing::error!(error = %self, "Response failed"),
            _ => tracing::debug!(status, error = %self, "Request rejected"),
        }

        let provider: Box<dyn ResponseProvider> = match self.format() {
            FormatMode::Json => Box::new(JsonProvider::new(false)),
            FormatMode::Xml => Box::new(XmlProvider::new(XML_ERROR_ROOT)),
        };
        let payload = json!({
            "status": status,
            "message": self.public_message(),
        });

        match provider.send_data(&payload, status, &[]) {
            Ok(response) => response.into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Error body could not be serialized");
                StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                    .into_response()
            }
        }
    }
}
