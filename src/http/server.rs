//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and shut down gracefully

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::http::handlers::{get_restricted, get_status, post_echo};
use crate::http::request::UuidRequestId;
use crate::http::settings::ResponseSettings;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<ResponseSettings>,
}

impl FromRef<AppState> for Arc<ResponseSettings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    config: ApiConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        let state = AppState {
            settings: Arc::new(ResponseSettings::from(&config)),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ApiConfig, state: AppState) -> Router {
        Router::new()
            .route("/status", get(get_status))
            .route("/echo", post(post_echo))
            .route("/restricted", get(get_restricted))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The configured router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            default_format = %self.config.response.default_format,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}
