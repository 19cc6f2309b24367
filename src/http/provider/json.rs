use serde_json::Value;

use super::ResponseProvider;
use crate::http::error::ApiError;
use crate::http::format::FormatMode;

/// Writes payloads as JSON text.
#[derive(Debug, Clone, Default)]
pub struct JsonProvider {
    pretty: bool,
}

impl JsonProvider {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ResponseProvider for JsonProvider {
    fn format(&self) -> FormatMode {
        FormatMode::Json
    }

    fn content_type(&self) -> &'static str {
        "application/json; charset=utf-8"
    }

    fn serialize(&self, payload: &Value) -> Result<Vec<u8>, ApiError> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(payload)
        } else {
            serde_json::to_vec(payload)
        };
        encoded.map_err(|e| ApiError::Serialization {
            format: FormatMode::Json,
            reason: e.to_string(),
        })
    }
}
