//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    IndexParts, OpenSearch, SearchParts,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use photo_indexer_shared::{PhotoDocument, SearchHit, SearchResponse};

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};

/// OpenSearch provider implementation.
///
/// Provides full-text search capabilities using OpenSearch as the backend.
///
/// # Example
///
/// ```ignore
/// use photo_indexer_repository::opensearch::{IndexConfig, OpenSearchProvider};
///
/// let hosts = vec!["http://localhost:9200".to_string()];
/// let provider = OpenSearchProvider::new(&hosts, IndexConfig::default()).await?;
/// provider.ensure_index_exists().await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the given hosts.
    ///
    /// Every host URL is validated up front, but the transport itself is built
    /// on the first host. This is a single configured connection context; no
    /// client-side pooling, retry, or failover happens here.
    ///
    /// # Arguments
    ///
    /// * `hosts` - The OpenSearch server URLs (e.g., `["http://localhost:9200"]`)
    /// * `index_config` - The index configuration containing the index name
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the host list is empty, a URL is invalid,
    ///   or transport setup fails
    pub async fn new(
        hosts: &[String],
        index_config: IndexConfig,
    ) -> Result<Self, SearchIndexError> {
        let parsed = Self::parse_hosts(hosts)?;
        let primary = parsed
            .into_iter()
            .next()
            .ok_or_else(|| SearchIndexError::connection("At least one host must be provided"))?;

        let conn_pool = SingleNodeConnectionPool::new(primary.clone());
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %primary,
            index = %index_config.name,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Parse and validate the configured host URLs.
    ///
    /// # Arguments
    ///
    /// * `hosts` - Host URL strings to validate
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Url>)` - All hosts parsed successfully
    /// * `Err(SearchIndexError)` - If the list is empty or any URL is invalid
    fn parse_hosts(hosts: &[String]) -> Result<Vec<Url>, SearchIndexError> {
        if hosts.is_empty() {
            return Err(SearchIndexError::connection(
                "At least one host must be provided",
            ));
        }

        hosts
            .iter()
            .map(|host| {
                Url::parse(host).map_err(|e| {
                    SearchIndexError::connection(format!("Invalid host '{}': {}", host, e))
                })
            })
            .collect()
    }

    /// Build the match query body for a keyword search.
    ///
    /// The query matches against the caption `text` field only.
    fn build_match_query(keyword: &str) -> Value {
        json!({
            "query": {
                "match": {
                    "text": keyword
                }
            }
        })
    }
}

/// Subset of the OpenSearch search response body this provider reads.
#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    took: u64,
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    total: TotalHits,
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_score")]
    score: Option<f64>,
    #[serde(rename = "_source")]
    source: PhotoDocument,
}

impl From<SearchResponseBody> for SearchResponse {
    fn from(body: SearchResponseBody) -> Self {
        let results = body
            .hits
            .hits
            .into_iter()
            .map(|hit| SearchHit {
                document: hit.source,
                relevance_score: hit.score.unwrap_or(0.0),
            })
            .collect();

        SearchResponse::new(results, body.hits.total.value, body.took)
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    /// Ensure the photo index exists, creating it with its mappings if necessary.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index already existed or was created
    /// * `Err(SearchIndexError)` - If the backend is unreachable or creation fails
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        let index = self.index_config.name.as_str();

        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?
            .status_code()
            .is_success();

        if exists {
            debug!(index = %index, "Search index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Created search index");
        Ok(())
    }

    /// Write a photo document to the search index under its external id.
    ///
    /// Uses the index API with an explicit document id, which creates the document
    /// when the id is new and replaces the stored document when the id exists.
    ///
    /// # Arguments
    ///
    /// * `document` - The photo document to persist
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written
    /// * `Err(SearchIndexError::ConnectionError)` - If the backend is unreachable
    /// * `Err(SearchIndexError::IndexError)` - If the backend rejected the write
    async fn index_document(&self, document: &PhotoDocument) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.name, &document.id))
            .body(document)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchIndexError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %document.id, "Document indexed");
        Ok(())
    }

    /// Run a keyword search against the caption text field.
    ///
    /// Sends a single match query and parses the hits into a `SearchResponse`,
    /// preserving the backend's relevance order.
    ///
    /// # Arguments
    ///
    /// * `keyword` - The search keyword, passed through as-is
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResponse)` - The matching documents with relevance scores
    /// * `Err(SearchIndexError::ConnectionError)` - If the backend is unreachable
    /// * `Err(SearchIndexError::SearchError)` - If the backend rejected the query
    /// * `Err(SearchIndexError::ParseError)` - If the response body is malformed
    async fn search_text(&self, keyword: &str) -> Result<SearchResponse, SearchIndexError> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index_config.name.as_str()]))
            .body(Self::build_match_query(keyword))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchIndexError::search(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body = response
            .json::<SearchResponseBody>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let results = SearchResponse::from(body);
        debug!(keyword = %keyword, hits = results.len(), "Search completed");
        Ok(results)
    }
}
