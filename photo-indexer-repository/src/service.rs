//! Photo search service implementation.
//!
//! This module provides the main service for interacting with the photo search
//! index. Application code uses this to index raw photo records and run keyword
//! searches.
//!
//! # Note on Write Semantics
//!
//! There is no separate create/update pair. `index_record` maps the raw record
//! and writes the full document under the record's external id: the backend
//! creates the document when the id is new and replaces it when the id exists.

use serde_json::Value;
use tracing::error;

use photo_indexer_shared::SearchResponse;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::mapper::PhotoMapper;

/// Diagnostic message emitted when the search backend cannot be reached.
const CONNECTION_FAILURE_MESSAGE: &str =
    "Search backend connection error. The server is probably down.";

/// The main service for indexing photo records and searching them.
///
/// This is the high-level API that application code should use. It owns the
/// record mapper and a `SearchIndexProvider` handle created once at startup;
/// there is no process-global connection state. Both operations return
/// `Result<T, SearchIndexError>`, so callers distinguish failure kinds by
/// matching the error variant. An empty search response is a success.
///
/// Connection failures are logged as structured error events and returned as
/// `SearchIndexError::ConnectionError`; every other backend fault passes
/// through unmodified.
///
/// # Example
///
/// ```no_run
/// use photo_indexer_repository::opensearch::{IndexConfig, OpenSearchProvider};
/// use photo_indexer_repository::{PhotoMapper, PhotoSearchService};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hosts = vec!["http://localhost:9200".to_string()];
/// let provider = Box::new(OpenSearchProvider::new(&hosts, IndexConfig::default()).await?);
/// let service = PhotoSearchService::new(PhotoMapper::new(), provider);
///
/// let record = json!({
///     "id": "p1",
///     "caption": { "text": "sunset", "from": { "username": "alice" } },
///     "images": {
///         "thumbnail": { "url": "t.jpg" },
///         "standard_resolution": { "url": "s.jpg" }
///     },
///     "created_time": "1000000000",
///     "tags": ["nature", "sky"]
/// });
///
/// service.index_record(&record).await?;
/// let results = service.search("sunset").await?;
/// # Ok(())
/// # }
/// ```
pub struct PhotoSearchService {
    mapper: PhotoMapper,
    provider: Box<dyn SearchIndexProvider>,
}

impl PhotoSearchService {
    /// Create a new PhotoSearchService.
    ///
    /// # Arguments
    ///
    /// * `mapper` - The raw record mapper
    /// * `provider` - A boxed implementation of `SearchIndexProvider` (e.g., `OpenSearchProvider`)
    ///
    /// # Returns
    ///
    /// A new `PhotoSearchService` instance.
    pub fn new(mapper: PhotoMapper, provider: Box<dyn SearchIndexProvider>) -> Self {
        Self { mapper, provider }
    }

    /// Map a raw photo record and write the resulting document to the search index.
    ///
    /// Mapping happens first and is pure: a record that fails to map returns the
    /// mapping error untouched and nothing is persisted. The write is an upsert
    /// keyed by the record's external id.
    ///
    /// # Arguments
    ///
    /// * `record` - The raw photo record JSON
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was indexed
    /// * `Err(SearchIndexError::MissingField)` - If a required key is absent
    /// * `Err(SearchIndexError::InvalidTimestamp)` - If the timestamp is malformed
    /// * `Err(SearchIndexError::ConnectionError)` - If the backend is unreachable
    /// * `Err(SearchIndexError)` - Any other backend fault, unmodified
    pub async fn index_record(&self, record: &Value) -> Result<(), SearchIndexError> {
        let document = self.mapper.map_record(record)?;

        match self.provider.index_document(&document).await {
            Err(SearchIndexError::ConnectionError(details)) => {
                error!(
                    photo_id = %document.id,
                    error = %details,
                    "{}", CONNECTION_FAILURE_MESSAGE
                );
                Err(SearchIndexError::ConnectionError(details))
            }
            other => other,
        }
    }

    /// Run a keyword search against the caption text field.
    ///
    /// The keyword is passed through to the backend as-is; matching behavior for
    /// an empty string is backend-defined. Hits come back in the backend's
    /// relevance order.
    ///
    /// # Arguments
    ///
    /// * `keyword` - The search keyword
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResponse)` - The matching documents, possibly empty
    /// * `Err(SearchIndexError::ConnectionError)` - If the backend is unreachable
    /// * `Err(SearchIndexError)` - Any other backend fault, unmodified
    pub async fn search(&self, keyword: &str) -> Result<SearchResponse, SearchIndexError> {
        match self.provider.search_text(keyword).await {
            Err(SearchIndexError::ConnectionError(details)) => {
                error!(
                    keyword = %keyword,
                    error = %details,
                    "{}", CONNECTION_FAILURE_MESSAGE
                );
                Err(SearchIndexError::ConnectionError(details))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Local;
    use photo_indexer_shared::{PhotoDocument, SearchHit};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use crate::utils::format_epoch_seconds;

    /// Mock provider for testing
    struct MockProvider {
        indexed: Arc<Mutex<Vec<PhotoDocument>>>,
        search_keywords: Arc<Mutex<Vec<String>>>,
        index_error: Option<SearchIndexError>,
        search_error: Option<SearchIndexError>,
        search_response: SearchResponse,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                indexed: Arc::new(Mutex::new(Vec::new())),
                search_keywords: Arc::new(Mutex::new(Vec::new())),
                index_error: None,
                search_error: None,
                search_response: SearchResponse::empty(),
            }
        }

        fn failing_with(error: SearchIndexError) -> Self {
            Self {
                index_error: Some(error.clone()),
                search_error: Some(error),
                ..Self::new()
            }
        }

        fn with_response(response: SearchResponse) -> Self {
            Self {
                search_response: response,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockProvider {
        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn index_document(&self, document: &PhotoDocument) -> Result<(), SearchIndexError> {
            if let Some(error) = &self.index_error {
                return Err(error.clone());
            }
            self.indexed.lock().await.push(document.clone());
            Ok(())
        }

        async fn search_text(&self, keyword: &str) -> Result<SearchResponse, SearchIndexError> {
            self.search_keywords.lock().await.push(keyword.to_string());
            if let Some(error) = &self.search_error {
                return Err(error.clone());
            }
            Ok(self.search_response.clone())
        }
    }

    /// Upsert-by-id provider backed by a plain map.
    struct InMemoryProvider {
        documents: Arc<Mutex<HashMap<String, PhotoDocument>>>,
    }

    impl InMemoryProvider {
        fn new() -> Self {
            Self {
                documents: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for InMemoryProvider {
        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn index_document(&self, document: &PhotoDocument) -> Result<(), SearchIndexError> {
            self.documents
                .lock()
                .await
                .insert(document.id.clone(), document.clone());
            Ok(())
        }

        async fn search_text(&self, _keyword: &str) -> Result<SearchResponse, SearchIndexError> {
            Ok(SearchResponse::empty())
        }
    }

    fn sample_record() -> serde_json::Value {
        json!({
            "id": "p1",
            "caption": {
                "text": "sunset",
                "from": {
                    "username": "alice"
                }
            },
            "images": {
                "thumbnail": {
                    "url": "t.jpg"
                },
                "standard_resolution": {
                    "url": "s.jpg"
                }
            },
            "created_time": "1000000000",
            "tags": ["nature", "sky"]
        })
    }

    fn sample_hit(id: &str, score: f64) -> SearchHit {
        SearchHit {
            document: PhotoDocument::new(
                id.to_string(),
                "sunset".to_string(),
                "alice".to_string(),
                "t.jpg".to_string(),
                "s.jpg".to_string(),
                "2001-09-09 01:46:40".to_string(),
            ),
            relevance_score: score,
        }
    }

    #[tokio::test]
    async fn test_index_record_maps_and_persists() {
        let provider = MockProvider::new();
        let indexed = provider.indexed.clone();
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        service.index_record(&sample_record()).await.unwrap();

        let documents = indexed.lock().await;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, "p1");
        assert_eq!(documents[0].text, "sunset");
        assert_eq!(documents[0].from_user, "alice");
        assert_eq!(documents[0].thumbnail, "t.jpg");
        assert_eq!(documents[0].image, "s.jpg");
        assert_eq!(documents[0].tags, vec!["nature", "sky"]);
        assert_eq!(
            documents[0].created_time,
            format_epoch_seconds(1_000_000_000.0, &Local).unwrap()
        );
    }

    #[tokio::test]
    async fn test_index_record_preserves_duplicate_tags() {
        let provider = MockProvider::new();
        let indexed = provider.indexed.clone();
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        let mut record = sample_record();
        record["tags"] = json!(["sky", "nature", "sky"]);
        service.index_record(&record).await.unwrap();

        let documents = indexed.lock().await;
        assert_eq!(documents[0].tags, vec!["sky", "nature", "sky"]);
    }

    #[tokio::test]
    async fn test_index_record_missing_field_persists_nothing() {
        let provider = MockProvider::new();
        let indexed = provider.indexed.clone();
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        let mut record = sample_record();
        record["caption"].as_object_mut().unwrap().remove("text");
        let result = service.index_record(&record).await;

        match result {
            Err(SearchIndexError::MissingField(path)) => assert_eq!(path, "caption.text"),
            other => panic!("expected MissingField but got {:?}", other),
        }
        assert!(indexed.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_index_record_invalid_timestamp_persists_nothing() {
        let provider = MockProvider::new();
        let indexed = provider.indexed.clone();
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        let mut record = sample_record();
        record["created_time"] = json!("yesterday");
        let result = service.index_record(&record).await;

        assert!(matches!(
            result.unwrap_err(),
            SearchIndexError::InvalidTimestamp(_)
        ));
        assert!(indexed.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_index_record_connection_error_is_returned() {
        let provider = MockProvider::failing_with(SearchIndexError::connection("refused"));
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        let result = service.index_record(&sample_record()).await;

        assert!(matches!(
            result.unwrap_err(),
            SearchIndexError::ConnectionError(_)
        ));
    }

    #[tokio::test]
    async fn test_index_record_backend_error_passes_through() {
        let provider = MockProvider::failing_with(SearchIndexError::index("mapping conflict"));
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        let result = service.index_record(&sample_record()).await;

        match result {
            Err(SearchIndexError::IndexError(msg)) => assert_eq!(msg, "mapping conflict"),
            other => panic!("expected IndexError but got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reindex_overwrites_previous_document() {
        let provider = InMemoryProvider::new();
        let documents = provider.documents.clone();
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        service.index_record(&sample_record()).await.unwrap();

        let mut updated = sample_record();
        updated["caption"]["text"] = json!("sunrise");
        updated["tags"] = json!(["dawn"]);
        service.index_record(&updated).await.unwrap();

        let stored = documents.lock().await;
        assert_eq!(stored.len(), 1);
        let document = stored.get("p1").unwrap();
        assert_eq!(document.text, "sunrise");
        assert_eq!(document.tags, vec!["dawn"]);
    }

    #[tokio::test]
    async fn test_search_returns_hits_in_provider_order() {
        let response = SearchResponse::new(
            vec![sample_hit("p2", 1.9), sample_hit("p1", 0.4)],
            2,
            12,
        );
        let provider = MockProvider::with_response(response);
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        let results = service.search("sunset").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results.total, 2);
        assert_eq!(results.results[0].document.id, "p2");
        assert_eq!(results.results[0].relevance_score, 1.9);
        assert_eq!(results.results[1].document.id, "p1");
    }

    #[tokio::test]
    async fn test_search_empty_result_is_success() {
        let provider = MockProvider::new();
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        let results = service.search("no-such-caption").await.unwrap();

        assert!(results.is_empty());
        assert_eq!(results.total, 0);
    }

    #[tokio::test]
    async fn test_search_passes_keyword_through() {
        let provider = MockProvider::new();
        let keywords = provider.search_keywords.clone();
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        service.search("sunset").await.unwrap();
        service.search("").await.unwrap();

        assert_eq!(*keywords.lock().await, vec!["sunset", ""]);
    }

    #[tokio::test]
    async fn test_search_connection_error_is_returned() {
        let provider = MockProvider::failing_with(SearchIndexError::connection("refused"));
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        let result = service.search("sunset").await;

        assert!(matches!(
            result.unwrap_err(),
            SearchIndexError::ConnectionError(_)
        ));
    }

    #[tokio::test]
    async fn test_search_backend_error_passes_through() {
        let provider = MockProvider::failing_with(SearchIndexError::search("bad query"));
        let service = PhotoSearchService::new(PhotoMapper::new(), Box::new(provider));

        let result = service.search("sunset").await;

        match result {
            Err(SearchIndexError::SearchError(msg)) => assert_eq!(msg, "bad query"),
            other => panic!("expected SearchError but got {:?}", other),
        }
    }
}
