//! Inbound request data.
//!
//! # Responsibilities
//! - Hold the parsed query string, the raw body and any pre-parsed POST
//!   fields for one request
//! - Generate unique request IDs (UUID v4) for tracing
//!
//! # Design Decisions
//! - The request is passed explicitly to the controller; nothing reads
//!   ambient request state
//! - Query values keep their order; lookups return the first match

use axum::body::Bytes;
use axum::http::{HeaderValue, Request, Uri};
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The parts of an inbound request the controller consumes.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    query: Vec<(String, String)>,
    raw_body: Bytes,
    post_fields: Map<String, Value>,
}

impl ApiRequest {
    /// Build a request from a raw query string (without the leading `?`).
    pub fn new(query: &str) -> Self {
        let query = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn from_uri(uri: &Uri) -> Self {
        Self::new(uri.query().unwrap_or_default())
    }

    pub fn with_raw_body(mut self, body: impl Into<Bytes>) -> Self {
        self.raw_body = body.into();
        self
    }

    /// Attach fields the host already parsed (e.g. from a multipart body).
    pub fn with_post_fields(mut self, fields: Map<String, Value>) -> Self {
        self.post_fields = fields;
        self
    }

    /// First value of the query parameter `name`.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    pub fn post_fields(&self) -> &Map<String, Value> {
        &self.post_fields
    }
}

/// Generates a UUID v4 for every request lacking an `x-request-id` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_lookup_takes_first_value() {
        let request = ApiRequest::new("format=XML&format=json&name=a+b");
        assert_eq!(request.query("format"), Some("XML"));
        assert_eq!(request.query("name"), Some("a b"));
        assert_eq!(request.query("missing"), None);
    }

    #[test]
    fn from_uri_without_query() {
        let uri: Uri = "/status".parse().unwrap();
        let request = ApiRequest::from_uri(&uri);
        assert_eq!(request.query("format"), None);
        assert!(request.raw_body().is_empty());
    }

    #[test]
    fn request_ids_are_unique() {
        let request = Request::new(());
        let mut maker = UuidRequestId;
        let a = maker.make_request_id(&request).unwrap();
        let b = maker.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
