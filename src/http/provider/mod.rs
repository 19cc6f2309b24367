//! Response providers.
//!
//! # Data Flow
//! ```text
//! handler payload (serde_json::Value)
//!     → ResponseProvider::serialize (JSON text or XML document)
//!     → ApiResponse (status + reason phrase + headers + body)
//!     → written by hyper
//! ```
//!
//! # Design Decisions
//! - Exactly two variants, chosen once per request by the controller
//! - Providers never inspect the request; format resolution lives in
//!   `ResponseSettings`

pub mod json;
pub mod xml;

use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::format::FormatMode;
use crate::http::response::ApiResponse;
use crate::http::settings::ResponseSettings;

pub use json::JsonProvider;
pub use xml::XmlProvider;

/// Serializes payloads into one wire format.
pub trait ResponseProvider: Send + Sync + std::fmt::Debug {
    fn format(&self) -> FormatMode;

    fn content_type(&self) -> &'static str;

    /// Serialize `payload` into the response body.
    fn serialize(&self, payload: &Value) -> Result<Vec<u8>, ApiError>;

    /// Serialize `payload` and build the response with `status` and the raw
    /// `headers`, applied in order.
    fn send_data(
        &self,
        payload: &Value,
        status: u16,
        headers: &[String],
    ) -> Result<ApiResponse, ApiError> {
        let body = self.serialize(payload)?;
        Ok(ApiResponse::new(self.format(), status, self.content_type(), body)
            .with_raw_headers(headers))
    }

    /// A 403 rendered in this provider's format.
    fn access_denied(&self) -> ApiError {
        ApiError::forbidden(self.format())
    }
}

/// Build the provider for `format`.
pub fn for_format(format: FormatMode, settings: &ResponseSettings) -> Box<dyn ResponseProvider> {
    match format {
        FormatMode::Json => Box::new(JsonProvider::new(settings.pretty_json)),
        FormatMode::Xml => Box::new(XmlProvider::new(&settings.xml_root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_matching_variant() {
        let settings = ResponseSettings::default();
        assert_eq!(for_format(FormatMode::Json, &settings).format(), FormatMode::Json);
        assert_eq!(for_format(FormatMode::Xml, &settings).format(), FormatMode::Xml);
    }

    #[test]
    fn send_data_for_both_variants() {
        let settings = ResponseSettings::default();
        let headers = vec!["X-Total: 5".to_string()];

        let json = for_format(FormatMode::Json, &settings)
            .send_data(&json!({"result": "ok"}), 200, &headers)
            .unwrap();
        assert_eq!(json.status(), 200);
        assert_eq!(json.reason(), "OK");
        assert_eq!(json.headers()["x-total"], "5");
        assert_eq!(&json.body()[..], br#"{"result":"ok"}"#);

        let xml = for_format(FormatMode::Xml, &settings)
            .send_data(&json!({"result": "ok"}), 200, &headers)
            .unwrap();
        assert_eq!(xml.reason(), "OK");
        assert_eq!(xml.headers()["x-total"], "5");
        assert_eq!(
            &xml.body()[..],
            br#"<?xml version="1.0" encoding="UTF-8"?><response><result>ok</result></response>"#
        );
    }

    #[test]
    fn access_denied_is_forbidden_in_own_format() {
        let settings = ResponseSettings::default();
        for format in [FormatMode::Json, FormatMode::Xml] {
            let err = for_format(format, &settings).access_denied();
            assert_eq!(err.status(), 403);
            assert_eq!(err.format(), format);
            assert!(matches!(err, ApiError::Forbidden { .. }));
        }
    }
}
