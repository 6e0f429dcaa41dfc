//! Photo Indexer Main Entry Point
//!
//! This is the main binary for the photo feed indexer. It reads a JSON feed
//! of raw photo records and indexes them into OpenSearch.

use dotenv::dotenv;
use photo_indexer::{Dependencies, IndexingError};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), IndexingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("photo_indexer=info,photo_indexer_repository=info"));

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
            service_name = "photo-indexer",
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
            service_name = "photo-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize tracing
    init_tracing()?;

    info!("Starting photo feed indexer");

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

    // Ingest the feed
    match deps.feed_loader.load_file(&deps.feed_path).await {
        Ok(summary) => {
            info!(
                total = summary.total,
                indexed = summary.indexed,
                failed = summary.failed,
                "Feed ingest completed"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Feed ingest failed");
            Err(e.into())
        }
    }
}
