//! Dependency initialization and wiring for the photo indexer.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::feed::FeedLoader;
use crate::IndexingError;
use photo_indexer_repository::opensearch::IndexConfig;
use photo_indexer_repository::{
    OpenSearchProvider, PhotoMapper, PhotoSearchService, SearchIndexProvider,
};

/// Default OpenSearch host list.
const DEFAULT_OPENSEARCH_HOSTS: &str = "http://localhost:9200";

/// Default photo index name.
const DEFAULT_PHOTOS_INDEX: &str = "photos";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured feed loader ready to run.
    pub feed_loader: FeedLoader,
    /// Path of the feed file to ingest.
    pub feed_path: PathBuf,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// Connects to OpenSearch eagerly and ensures the photo index exists before
    /// anything is ingested, so a misconfigured environment fails at startup.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_HOSTS`: Comma-separated OpenSearch URLs (default: http://localhost:9200)
    /// - `PHOTOS_INDEX`: Index name (default: "photos")
    /// - `PHOTO_FEED_PATH`: Path of the JSON feed file to ingest (required)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If configuration is incomplete or the backend
    ///   cannot be prepared
    pub async fn new() -> Result<Self, IndexingError> {
        let hosts = split_hosts(
            &env::var("OPENSEARCH_HOSTS").unwrap_or_else(|_| DEFAULT_OPENSEARCH_HOSTS.to_string()),
        );
        let index_name =
            env::var("PHOTOS_INDEX").unwrap_or_else(|_| DEFAULT_PHOTOS_INDEX.to_string());
        let feed_path = env::var("PHOTO_FEED_PATH")
            .map(PathBuf::from)
            .map_err(|_| IndexingError::config("PHOTO_FEED_PATH must be set"))?;

        info!(
            hosts = ?hosts,
            index = %index_name,
            feed_path = %feed_path.display(),
            "Initializing dependencies"
        );

        let index_config = IndexConfig::new(index_name);
        let provider = OpenSearchProvider::new(&hosts, index_config)
            .await
            .map_err(|e| {
                IndexingError::config(format!("Failed to create OpenSearch provider: {}", e))
            })?;

        info!("OpenSearch connection established");

        // Ensure the index exists (validate and create if not exists).
        // Exits if the index cannot be created.
        provider
            .ensure_index_exists()
            .await
            .map_err(|e| IndexingError::config(format!("Failed to ensure index exists: {}", e)))?;

        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));
        let feed_loader = FeedLoader::new(Arc::new(service));

        Ok(Self {
            feed_loader,
            feed_path,
        })
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
