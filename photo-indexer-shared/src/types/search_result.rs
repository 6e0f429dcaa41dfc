//! Search result types for the photo search indexer.
//!
//! This module defines the response structures returned from search operations.

use serde::{Deserialize, Serialize};

use crate::types::photo_document::PhotoDocument;

/// A single search hit.
///
/// Contains the photo document along with its relevance score from the search engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// The stored photo document.
    pub document: PhotoDocument,

    /// Relevance score from the search engine.
    /// Higher scores indicate better matches.
    pub relevance_score: f64,
}

/// Complete search response with results and metadata.
///
/// Results carry the order the search backend returned them in; nothing
/// re-ranks them afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    /// The list of search hits, in backend relevance order.
    pub results: Vec<SearchHit>,

    /// Total number of matching documents.
    pub total: u64,

    /// Time taken to execute the search in milliseconds.
    pub took_ms: u64,
}

impl SearchResponse {
    /// Create an empty search response.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            took_ms: 0,
        }
    }

    /// Create a new search response.
    pub fn new(results: Vec<SearchHit>, total: u64, took_ms: u64) -> Self {
        Self {
            results,
            total,
            took_ms,
        }
    }

    /// Returns true if there are no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of results in this response.
    pub fn len(&self) -> usize {
        self.results.len()
    }
}
