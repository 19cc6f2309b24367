//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_responses_total` (counter): responses emitted, by format and status

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::http::format::FormatMode;

/// Install the Prometheus recorder and its scrape endpoint.
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_response(format: FormatMode, status: u16) {
    metrics::counter!(
        "api_responses_total",
        "format" => format.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
}
