//! Base API controller.
//!
//! # Responsibilities
//! - Resolve the wire format once per request and own the matching provider
//! - Decode the request body into parameters
//! - Hand payloads to the provider with the controller's default status
//!
//! # Design Decisions
//! - `send_data` and `access_denied` consume the controller; once a response
//!   exists the handler has nothing left to write with
//! - Usable directly as an axum extractor; it must be the last extractor
//!   since it reads the body

use std::sync::Arc;

use axum::extract::{FromRef, FromRequest, Request};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::error::ApiError;
use crate::http::format::FormatMode;
use crate::http::params::decode_params;
use crate::http::provider::{self, ResponseProvider};
use crate::http::request::ApiRequest;
use crate::http::response::ApiResponse;
use crate::http::settings::ResponseSettings;

/// Per-request controller state.
#[derive(Debug)]
pub struct ApiController {
    request: ApiRequest,
    provider: Box<dyn ResponseProvider>,
    status_code: u16,
}

impl ApiController {
    pub fn new(request: ApiRequest, settings: &ResponseSettings) -> Self {
        let format = settings.resolve_format(&request);
        tracing::debug!(%format, "Response format resolved");

        Self {
            provider: provider::for_format(format, settings),
            status_code: settings.default_status,
            request,
        }
    }

    pub fn format(&self) -> FormatMode {
        self.provider.format()
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Status used when `send_data` is called without one.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn set_status_code(&mut self, status: u16) {
        self.status_code = status;
    }

    /// Request parameters from the body: JSON, then form data, then the
    /// host's POST fields. Never fails.
    pub fn input_params(&self) -> Map<String, Value> {
        decode_params(self.request.raw_body(), self.request.post_fields())
    }

    /// Serialize `payload` and build the response.
    ///
    /// ```text
    /// api.send_data(
    ///     &items,
    ///     Some(200),
    ///     &[format!("Content-Range: items {offset}-{limit}/{total}")],
    /// )
    /// ```
    pub fn send_data<T: Serialize + ?Sized>(
        self,
        payload: &T,
        status: Option<u16>,
        headers: &[String],
    ) -> Result<ApiResponse, ApiError> {
        let status = status.unwrap_or(self.status_code);
        let payload = serde_json::to_value(payload).map_err(|e| ApiError::Serialization {
            format: self.format(),
            reason: e.to_string(),
        })?;

        tracing::debug!(format = %self.format(), status, headers = headers.len(), "Sending data");
        self.provider.send_data(&payload, status, headers)
    }

    /// Reject the request with a 403 in the resolved format.
    pub fn access_denied(self) -> ApiError {
        self.provider.access_denied()
    }
}

impl<S> FromRequest<S> for ApiController
where
    Arc<ResponseSettings>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let settings = Arc::<ResponseSettings>::from_ref(state);
        let (parts, body) = req.into_parts();
        let request = ApiRequest::from_uri(&parts.uri);

        let raw_body = axum::body::to_bytes(body, settings.max_body_size)
            .await
            .map_err(|e| ApiError::BodyRead {
                format: settings.resolve_format(&request),
                reason: e.to_string(),
            })?;

        Ok(Self::new(request.with_raw_body(raw_body), &settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn controller(query: &str, body: &str) -> ApiController {
        ApiController::new(
            ApiRequest::new(query).with_raw_body(body.to_string()),
            &ResponseSettings::default(),
        )
    }

    #[test]
    fn format_resolved_at_construction() {
        assert_eq!(controller("format=Xml", "").format(), FormatMode::Xml);
        assert_eq!(controller("format=yaml", "").format(), FormatMode::Json);
        assert_eq!(controller("", "").format(), FormatMode::Json);
    }

    #[test]
    fn input_params_from_json_and_form() {
        let params = controller("", r#"{"a":1,"b":"x"}"#).input_params();
        assert_eq!(Value::Object(params), json!({"a": 1, "b": "x"}));

        let params = controller("", "a=1&b=x").input_params();
        assert_eq!(Value::Object(params), json!({"a": "1", "b": "x"}));
    }

    #[test]
    fn input_params_use_post_fields_last() {
        let mut post = Map::new();
        post.insert("field".into(), json!("value"));
        let api = ApiController::new(
            ApiRequest::new("").with_raw_body("???").with_post_fields(post.clone()),
            &ResponseSettings::default(),
        );
        assert_eq!(api.input_params(), post);

        assert!(controller("", "???").input_params().is_empty());
    }

    #[test]
    fn send_data_uses_default_status() {
        let mut api = controller("", "");
        api.set_status_code(404);
        let response = api.send_data(&json!({"missing": true}), None, &[]).unwrap();
        assert_eq!(response.status(), 404);
        assert_eq!(response.reason(), "Not Found");
    }

    #[test]
    fn send_data_with_headers() {
        let headers = vec!["X-Total: 5".to_string()];
        let response = controller("format=json", "")
            .send_data(&json!({"result": "ok"}), Some(200), &headers)
            .unwrap();
        assert_eq!(response.format(), FormatMode::Json);
        assert_eq!(response.reason(), "OK");
        assert_eq!(response.headers()["x-total"], "5");
        assert_eq!(&response.body()[..], br#"{"result":"ok"}"#);

        let response = controller("format=XML", "")
            .send_data(&json!({"result": "ok"}), Some(200), &headers)
            .unwrap();
        assert_eq!(response.format(), FormatMode::Xml);
        assert!(std::str::from_utf8(response.body())
            .unwrap()
            .ends_with("<response><result>ok</result></response>"));
    }

    #[test]
    fn send_data_serializes_typed_payloads() {
        #[derive(Serialize)]
        struct Item {
            id: u32,
        }

        let response = controller("", "")
            .send_data(&[Item { id: 1 }, Item { id: 2 }], Some(201), &[])
            .unwrap();
        assert_eq!(response.status(), 201);
        assert_eq!(response.reason(), "");
        assert_eq!(&response.body()[..], br#"[{"id":1},{"id":2}]"#);
    }

    #[test]
    fn unserializable_payload_is_an_error() {
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), "tuple keys are not JSON");

        let err = controller("", "").send_data(&map, None, &[]).unwrap_err();
        assert!(matches!(err, ApiError::Serialization { .. }));
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn access_denied_delegates_to_provider() {
        for (query, format) in [("format=xml", FormatMode::Xml), ("", FormatMode::Json)] {
            let err = controller(query, "").access_denied();
            assert_eq!(err.status(), 403);
            assert_eq!(err.format(), format);
        }
    }
}
