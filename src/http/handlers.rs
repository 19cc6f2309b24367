//! Built-in API endpoints.

use serde::Serialize;

use crate::http::controller::ApiController;
use crate::http::error::ApiError;
use crate::http::response::ApiResponse;

#[derive(Serialize)]
pub struct SystemStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn get_status(api: ApiController) -> Result<ApiResponse, ApiError> {
    api.send_data(
        &SystemStatus {
            status: "operational",
            version: env!("CARGO_PKG_VERSION"),
        },
        None,
        &[],
    )
}

/// Echo the decoded request parameters back to the caller.
pub async fn post_echo(api: ApiController) -> Result<ApiResponse, ApiError> {
    let params = api.input_params();
    let headers = vec![format!("X-Param-Count: {}", params.len())];
    api.send_data(&params, None, &headers)
}

pub async fn get_restricted(api: ApiController) -> Result<ApiResponse, ApiError> {
    Err(api.access_denied())
}
