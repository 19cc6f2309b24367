//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and names.
//! All errors are collected rather than stopping at the first one.

use std::net::SocketAddr;

use crate::config::schema::ApiConfig;
use crate::http::provider::xml::is_valid_name;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, returning every error found.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let response = &config.response;
    if response.format_param.trim().is_empty() {
        errors.push(ValidationError::new("response.format_param", "must not be empty"));
    }
    if !matches!(
        response.default_format.to_lowercase().as_str(),
        "json" | "xml"
    ) {
        errors.push(ValidationError::new(
            "response.default_format",
            format!("expected 'json' or 'xml', got '{}'", response.default_format),
        ));
    }
    if !(100..=999).contains(&response.default_status) {
        errors.push(ValidationError::new(
            "response.default_status",
            format!("{} is outside 100..=999", response.default_status),
        ));
    }
    if !is_valid_name(&response.xml_root) {
        errors.push(ValidationError::new(
            "response.xml_root",
            format!("'{}' is not a valid XML element name", response.xml_root),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
