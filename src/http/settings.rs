//! Per-service response settings shared by every request.

use crate::config::ApiConfig;
use crate::http::format::FormatMode;
use crate::http::request::ApiRequest;

/// Immutable settings derived from [`ApiConfig`], shared via `Arc`.
#[derive(Debug, Clone)]
pub struct ResponseSettings {
    pub format_param: String,
    pub default_format: FormatMode,
    pub default_status: u16,
    pub xml_root: String,
    pub pretty_json: bool,
    pub max_body_size: usize,
}

impl ResponseSettings {
    /// Resolve the wire format for `request`. Called once per request.
    pub fn resolve_format(&self, request: &ApiRequest) -> FormatMode {
        request
            .query(&self.format_param)
            .map_or(self.default_format, FormatMode::from_hint)
    }
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ResponseSettings {
    fn from(config: &ApiConfig) -> Self {
        Self {
            format_param: config.response.format_param.clone(),
            default_format: FormatMode::from_hint(&config.response.default_format),
            default_status: config.response.default_status,
            xml_root: config.response.xml_root.clone(),
            pretty_json: config.response.pretty_json,
            max_body_size: config.security.max_body_size,
        }
    }
}
