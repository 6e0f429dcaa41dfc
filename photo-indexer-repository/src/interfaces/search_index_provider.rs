//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use photo_indexer_shared::{PhotoDocument, SearchResponse};

use crate::errors::SearchIndexError;

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// This trait defines the interface for all search index backend implementations.
/// Implementations are injected into `PhotoSearchService` to enable dependency
/// injection and easy testing with mock implementations.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error handling
/// across different backend implementations.
///
/// # Note on Write Semantics
///
/// There is no separate create/update pair. `index_document` writes the full
/// document under the record's external id: the backend creates the document when
/// the id is new and replaces it when the id already exists.
///
/// # Index Initialization
///
/// Implementations should call `ensure_index_exists` during application startup to
/// ensure the search index is properly configured before performing document
/// operations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the search index exists, creating it with its mappings if necessary.
    ///
    /// This method should be called during application startup to ensure the backend
    /// is properly initialized before performing document operations.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index is ready for use
    /// * `Err(SearchIndexError)` - If initialization fails
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Write a photo document to the search index under its external id.
    ///
    /// Performs a create-or-replace write: a new id creates the document, an
    /// existing id replaces the stored document in full.
    ///
    /// # Arguments
    ///
    /// * `document` - The photo document to persist
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written successfully
    /// * `Err(SearchIndexError)` - If the operation fails
    async fn index_document(&self, document: &PhotoDocument) -> Result<(), SearchIndexError>;

    /// Run a keyword search against the caption text field.
    ///
    /// Executes a single match query; hits come back in the backend's relevance
    /// order and are not re-ranked. An empty result set is a successful response.
    ///
    /// # Arguments
    ///
    /// * `keyword` - The search keyword, passed through to the backend as-is
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResponse)` - The matching documents with relevance scores
    /// * `Err(SearchIndexError)` - If the search fails
    async fn search_text(&self, keyword: &str) -> Result<SearchResponse, SearchIndexError>;
}
