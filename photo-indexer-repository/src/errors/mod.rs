//! Error types for the photo indexer repository.
//!
//! This module provides a unified error type for all indexing and search operations.

mod search_index_error;

pub use search_index_error::SearchIndexError;
