//! Dependency initialization and wiring for the photo browser server.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::ServerError;
use photo_indexer_repository::opensearch::IndexConfig;
use photo_indexer_repository::{
    OpenSearchProvider, PhotoMapper, PhotoSearchService, SearchIndexProvider,
};

/// Default OpenSearch host list.
const DEFAULT_OPENSEARCH_HOSTS: &str = "http://localhost:9200";

/// Default photo index name.
const DEFAULT_PHOTOS_INDEX: &str = "photos";

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The search service shared across request handlers.
    pub service: Arc<PhotoSearchService>,
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// Connects to OpenSearch eagerly and ensures the photo index exists before
    /// the server starts accepting requests, so a misconfigured environment
    /// fails at startup.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_HOSTS`: Comma-separated OpenSearch URLs (default: http://localhost:9200)
    /// - `PHOTOS_INDEX`: Index name (default: "photos")
    /// - `BIND_ADDR`: Listen address (default: 0.0.0.0:8080)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServerError)` - If configuration is invalid or the backend
    ///   cannot be prepared
    pub async fn new() -> Result<Self, ServerError> {
        let hosts = split_hosts(
            &env::var("OPENSEARCH_HOSTS").unwrap_or_else(|_| DEFAULT_OPENSEARCH_HOSTS.to_string()),
        );
        let index_name =
            env::var("PHOTOS_INDEX").unwrap_or_else(|_| DEFAULT_PHOTOS_INDEX.to_string());
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ServerError::config(format!("Invalid BIND_ADDR: {}", e)))?;

        info!(
            hosts = ?hosts,
            index = %index_name,
            bind_addr = %bind_addr,
            "Initializing dependencies"
        );

        let index_config = IndexConfig::new(index_name);
        let provider = OpenSearchProvider::new(&hosts, index_config)
            .await
            .map_err(|e| {
                ServerError::config(format!("Failed to create OpenSearch provider: {}", e))
            })?;

        info!("OpenSearch connection established");

        // Ensure the index exists (validate and create if not exists).
        // Exits if the index cannot be created.
        provider
            .ensure_index_exists()
            .await
            .map_err(|e| ServerError::config(format!("Failed to ensure index exists: {}", e)))?;

        let service = Arc::new(PhotoSearchService::new(PhotoMapper::new(), Box::new(provider)));

        Ok(Self { service, bind_addr })
    }
}

/// Split the comma-separated host list from the environment.
fn split_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .collect()
}
