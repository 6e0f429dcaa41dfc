//! Photo Browser Main Entry Point
//!
//! This is the main binary for the photo search API server. It exposes photos
//! indexed in OpenSearch through a keyword search endpoint.

use dotenv::dotenv;
use photo_browser::{build_app, Dependencies, ServerError};
use std::env;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("photo_browser=info,photo_indexer_repository=info,tower_http=info")
    });

    let json_logs = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        // JSON format for structured log collection
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "photo-browser",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        // Pretty console output for local runs
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "photo-browser",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize tracing
    init_tracing()?;

    info!("Starting photo browser server");

    // Initialize dependencies
    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let app = build_app(deps.service);

    let listener = TcpListener::bind(deps.bind_addr).await?;
    info!(addr = %deps.bind_addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
