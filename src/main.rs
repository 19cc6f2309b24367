//! API response service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request ──▶ listener ──▶ axum router ──▶ ApiController
//!                                                      │  format=json|xml
//!                                                      ▼
//!     Client Response ◀── ApiResponse ◀── JsonProvider / XmlProvider
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_responder::config::{load_config, ApiConfig};
use api_responder::lifecycle::{spawn_signal_handler, Shutdown};
use api_responder::observability::{logging, metrics};
use api_responder::HttpServer;

#[derive(Parser)]
#[command(name = "api-responder")]
#[command(about = "Serve API responses as JSON or XML", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ApiConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("api-responder v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        format_param = %config.response.format_param,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_handler(&shutdown);

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
