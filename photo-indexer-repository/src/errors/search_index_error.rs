//! Search index error types.
//!
//! This module defines the unified error type for all photo indexing and search
//! operations, covering both record-shape errors raised during mapping and
//! backend errors raised by the search index.

use thiserror::Error;

/// Unified errors from photo indexing and search operations.
///
/// Used by the `PhotoMapper`, the `SearchIndexProvider` trait and the
/// `PhotoSearchService`. Record-shape errors (`MissingField`,
/// `InvalidTimestamp`) are raised before any document reaches the backend;
/// the remaining variants describe backend faults. `ConnectionError` is the
/// only variant the service layer treats specially.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// A required field is absent from the raw record, or has the wrong type.
    /// Carries the dotted path of the offending key.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// The record's creation timestamp could not be interpreted as epoch seconds.
    /// Carries the raw value.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Failed to reach the search index backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The backend rejected an index request.
    #[error("Index error: {0}")]
    IndexError(String),

    /// The backend rejected a search request.
    #[error("Search error: {0}")]
    SearchError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse a response from the search index backend.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchIndexError {
    /// Create a missing field error.
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField(path.into())
    }

    /// Create an invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp(value.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a search error.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
