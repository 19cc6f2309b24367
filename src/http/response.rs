//! Outbound response construction.
//!
//! # Responsibilities
//! - Carry the status, reason phrase, headers and serialized body
//! - Apply caller-supplied raw header strings in order
//! - Put the reason phrase from the status table on the wire
//!
//! # Design Decisions
//! - Headers are raw `"Name: value"` strings; malformed ones are logged and skipped
//! - A caller `Content-Type` replaces the format's default, other headers append
//! - Status codes that cannot be encoded become 500

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use hyper::ext::ReasonPhrase;

use crate::http::format::FormatMode;
use crate::http::status::reason_phrase;
use crate::observability::metrics;

/// A fully serialized response, ready to be written.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    format: FormatMode,
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn new(
        format: FormatMode,
        status: u16,
        content_type: &'static str,
        body: impl Into<Bytes>,
    ) -> Self {
        let status = if StatusCode::from_u16(status).is_ok() {
            status
        } else {
            tracing::warn!(status, "Status code cannot be sent, using 500");
            500
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));

        Self {
            format,
            status,
            headers,
            body: body.into(),
        }
    }

    /// Apply raw header strings in order.
    pub fn with_raw_headers<S: AsRef<str>>(mut self, raw_headers: &[S]) -> Self {
        for raw in raw_headers {
            let raw = raw.as_ref();
            match parse_raw_header(raw) {
                Some((name, value)) if name == header::CONTENT_TYPE => {
                    self.headers.insert(name, value);
                }
                Some((name, value)) => {
                    self.headers.append(name, value);
                }
                None => tracing::warn!(header = %raw, "Skipping malformed response header"),
            }
        }
        self
    }

    pub fn format(&self) -> FormatMode {
        self.format
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> &'static str {
        reason_phrase(self.status)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

fn parse_raw_header(raw: &str) -> Option<(HeaderName, HeaderValue)> {
    let (name, value) = raw.split_once(':')?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).ok()?;
    let value = HeaderValue::from_str(value.trim()).ok()?;
    Some((name, value))
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        metrics::record_response(self.format, self.status);

        let reason = self.reason();
        let mut response = Response::new(Body::from(self.body));
        // Validated in `new`.
        *response.status_mut() =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        *response.headers_mut() = self.headers;
        response
            .extensions_mut()
            .insert(ReasonPhrase::from_static(reason.as_bytes()));
        response
    }
}
